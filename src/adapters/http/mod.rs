//! HTTP surface: router, handlers, DTOs and the authentication boundary.

mod dto;
mod error;
mod handlers;
pub mod middleware;
mod routes;

pub use dto::{CreateInvoiceRequest, CreateInvoiceResponse, ErrorResponse, WebhookPayload};
pub use error::ApiError;
pub use handlers::AppState;
pub use routes::{cors_layer, router};
