//! LNbits payment processor configuration

use serde::Deserialize;

use super::error::ValidationError;

/// LNbits configuration
///
/// All three values are required; the server cannot issue or verify
/// invoices without them, so startup aborts when any is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LnbitsConfig {
    /// Base URL of the LNbits instance
    #[serde(default)]
    pub url: String,

    /// Admin API key
    #[serde(default)]
    pub admin_key: String,

    /// Invoice/read API key used for invoice creation and status checks
    #[serde(default)]
    pub invoice_key: String,
}

impl LnbitsConfig {
    /// Validate LNbits configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("NOSTR_PAY__LNBITS__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidLnbitsUrl);
        }
        if self.admin_key.is_empty() {
            return Err(ValidationError::MissingRequired(
                "NOSTR_PAY__LNBITS__ADMIN_KEY",
            ));
        }
        if self.invoice_key.is_empty() {
            return Err(ValidationError::MissingRequired(
                "NOSTR_PAY__LNBITS__INVOICE_KEY",
            ));
        }
        Ok(())
    }
}
