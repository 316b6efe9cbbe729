//! Request and response bodies for the payment endpoints.
//!
//! Payments themselves serialize straight from the domain type; only the
//! shapes that differ from the domain get a DTO here.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/payments/invoice`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub amount: i64,
    #[serde(default)]
    pub memo: String,
}

/// Body of the 201 response to invoice creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceResponse {
    pub payment_id: String,
    pub invoice: String,
    pub payment_hash: String,
}

/// Body of `POST /api/payments/webhook`, sent by the processor.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub payment_hash: String,
}

/// Uniform error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
