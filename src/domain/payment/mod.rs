//! Payment domain model.

mod errors;
mod payment;

pub use errors::PaymentError;
pub use payment::{Payment, PaymentStatus};
