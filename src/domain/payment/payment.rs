//! The Payment aggregate and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a payment.
///
/// The only transition any operation performs is `Pending` -> `Paid`,
/// driven by a confirmed settlement webhook. `Expired` is part of the
/// persisted vocabulary but nothing sets it; there is no expiry sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Expired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Lightning payment tracked from invoice creation to settlement.
///
/// `payment_hash` is assigned by the processor, unique, and immutable; it
/// is the correlation key for settlement webhooks. `settled_at` is set
/// exactly once, together with the transition to `Paid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Locally generated identifier (`pay_<uuid>`).
    pub id: String,
    /// Opaque bolt11 invoice string issued by the processor.
    pub invoice: String,
    /// Amount in satoshis; always positive.
    pub amount: i64,
    /// Free-text memo; may be empty.
    pub memo: String,
    /// Payer identity, when known at creation time.
    pub sender_pubkey: Option<String>,
    /// Payee identity.
    pub receiver_pubkey: String,
    /// Processor-assigned settlement correlation key.
    pub payment_hash: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    /// Settlement time; non-null exactly when `status` is `Paid`.
    pub settled_at: Option<DateTime<Utc>>,
}
