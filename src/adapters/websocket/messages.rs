//! Wire messages pushed to payment watchers.

use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentStatus;

/// Status event delivered to every watcher of a payment hash.
///
/// Serialized as `{"payment_hash": "...", "status": "paid"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub payment_hash: String,
    pub status: PaymentStatus,
}
