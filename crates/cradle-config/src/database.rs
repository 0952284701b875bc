//! Catalog database configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_path() -> String {
    ".cradle/cradle.db".to_string()
}

const fn default_retry_max_attempts() -> u32 {
    4
}

const fn default_retry_base_delay_ms() -> u64 {
    100
}

const fn default_retry_max_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local libSQL file. `":memory:"` opens an in-memory database.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://catalog.turso.io`). Wins over `path` when set.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Attempts per statement when the remote store reports a transient error.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Whether a remote database is configured.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }

    /// Check field combinations figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty path, a remote URL
    /// without a token, or a retry policy that cannot make progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_remote() {
            if self.auth_token.is_empty() {
                return Err(ConfigError::invalid(
                    "database.auth_token",
                    "required when database.url is set",
                ));
            }
        } else if self.path.trim().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.retry_max_attempts == 0 {
            return Err(ConfigError::invalid(
                "database.retry_max_attempts",
                "must be at least 1",
            ));
        }
        if self.retry_base_delay_ms > self.retry_max_delay_ms {
            return Err(ConfigError::invalid(
                "database.retry_base_delay_ms",
                "must not exceed database.retry_max_delay_ms",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.path, ".cradle/cradle.db");
        assert_eq!(config.retry_max_attempts, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn remote_requires_token() {
        let mut config = DatabaseConfig {
            url: "libsql://catalog.turso.io".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.auth_token = "token".into();
        assert!(config.is_remote());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = DatabaseConfig {
            retry_max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "database.retry_max_attempts"
        ));
    }
}
