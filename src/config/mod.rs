//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `NOSTR_PAY` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use nostr_pay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod lnbits;
mod nostr;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use lnbits::LnbitsConfig;
pub use nostr::NostrConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, public URL, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (SQLite file)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// LNbits payment processor configuration
    #[serde(default)]
    pub lnbits: LnbitsConfig,

    /// Nostr relay configuration
    #[serde(default)]
    pub nostr: NostrConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `NOSTR_PAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `NOSTR_PAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NOSTR_PAY__LNBITS__URL=...` -> `lnbits.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types. Missing required values are reported by [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NOSTR_PAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    /// Missing LNbits credentials are a fatal startup condition: the
    /// server cannot create or verify invoices without them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.lnbits.validate()?;
        Ok(())
    }
}
