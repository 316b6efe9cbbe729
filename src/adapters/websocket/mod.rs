//! Real-time payment status notifications over websockets.

mod handler;
mod hub;
mod messages;

pub use handler::ws_handler;
pub use hub::{PaymentHub, WatcherId};
pub use messages::PaymentUpdate;
