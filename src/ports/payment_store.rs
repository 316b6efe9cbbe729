//! Payment persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::payment::{Payment, PaymentError};

/// Port for payment persistence.
///
/// Lookups distinguish "absent" (`Ok(None)`) from a storage failure so
/// callers can map them to different responses.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a freshly created payment.
    async fn create_payment(&self, payment: &Payment) -> Result<(), PaymentError>;

    /// Fetch a payment by local id.
    async fn get_payment(&self, id: &str) -> Result<Option<Payment>, PaymentError>;

    /// Fetch a payment by processor hash.
    async fn get_payment_by_hash(&self, payment_hash: &str)
        -> Result<Option<Payment>, PaymentError>;

    /// Transition a payment from pending to paid, recording `settled_at`.
    ///
    /// The write is conditional on the payment still being pending;
    /// returns `false` when it was already settled, in which case the
    /// original `settled_at` is left untouched.
    async fn mark_paid(&self, id: &str, settled_at: DateTime<Utc>) -> Result<bool, PaymentError>;

    /// Payments where the identity is sender or receiver, newest first.
    async fn list_payments_for(
        &self,
        pubkey: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Payment>, PaymentError>;
}
