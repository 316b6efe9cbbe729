//! Nostr relay configuration

use serde::Deserialize;

/// Nostr configuration
///
/// The relay list is handed to clients building zap receipts; none of the
/// server's own request paths dial a relay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NostrConfig {
    /// Relay URLs (comma-separated)
    pub relays: Option<String>,
}

impl NostrConfig {
    /// Get relay URLs as a vector
    pub fn relay_list(&self) -> Vec<String> {
        self.relays
            .as_ref()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    }
}
