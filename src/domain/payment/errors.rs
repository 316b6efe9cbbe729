//! Error taxonomy for the payment lifecycle.

use thiserror::Error;

/// Errors surfaced by payment operations.
///
/// The HTTP layer maps these onto status codes: `Validation` -> 400,
/// `NotFound` -> 404, `Upstream` and `Storage` -> 500. A webhook that
/// reports a not-yet-paid invoice is not an error at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Input rejected before any external call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced payment does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The payment processor failed or answered with an unexpected status.
    #[error("payment processor error: {0}")]
    Upstream(String),

    /// The persistence layer failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl PaymentError {
    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PaymentError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        PaymentError::Upstream(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PaymentError::Storage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_category() {
        assert_eq!(
            PaymentError::validation("amount must be positive").to_string(),
            "validation failed: amount must be positive"
        );
        assert_eq!(
            PaymentError::not_found("payment pay_1").to_string(),
            "not found: payment pay_1"
        );
        assert_eq!(
            PaymentError::upstream("status 500").to_string(),
            "payment processor error: status 500"
        );
    }
}
