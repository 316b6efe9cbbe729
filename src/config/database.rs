//! Database configuration (SQLite)

use serde::Deserialize;

use super::error::ValidationError;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_path")]
    pub path: String,

    /// Busy timeout in seconds for lock contention between writers
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::InvalidDatabasePath);
        }
        if self.busy_timeout_secs == 0 || self.busy_timeout_secs > 60 {
            return Err(ValidationError::InvalidBusyTimeout);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

fn default_path() -> String {
    "./data/nostr-pay.db".to_string()
}

fn default_busy_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "./data/nostr-pay.db");
        assert_eq!(config.busy_timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let config = DatabaseConfig {
            path: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = DatabaseConfig {
            busy_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
