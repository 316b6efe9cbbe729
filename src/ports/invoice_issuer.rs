//! Invoice issuer port for the external payment processor.
//!
//! The processor owns invoice strings and payment hashes; both are opaque
//! to this system. Settlement is never trusted from the webhook alone:
//! the lifecycle manager re-checks the hash against the processor through
//! this port before transitioning a payment.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::payment::PaymentError;

/// Request to create an invoice with the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequest {
    /// Amount in satoshis.
    pub amount: i64,
    /// Memo attached to the invoice.
    pub memo: String,
    /// Callback URL the processor calls on settlement.
    pub webhook_url: Option<String>,
}

/// An invoice issued by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuedInvoice {
    pub payment_hash: String,
    pub payment_request: String,
    pub checking_id: String,
}

/// Authoritative settlement state of a payment hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettlementStatus {
    pub paid: bool,
    #[serde(default)]
    pub preimage: String,
    #[serde(default)]
    pub payment_hash: String,
}

/// Port for the external invoice processor.
#[async_trait]
pub trait InvoiceIssuer: Send + Sync {
    /// Create an invoice for the given amount.
    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<IssuedInvoice, PaymentError>;

    /// Query the authoritative status of a payment hash.
    async fn check_payment(&self, payment_hash: &str) -> Result<SettlementStatus, PaymentError>;
}
