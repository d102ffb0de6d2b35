//! # Configuration
//!
//! Runtime settings for controllers and the HTTP transport. Both can be built from the
//! process environment (`from_env`) or from any key lookup (`from_lookup`), which keeps
//! tests independent of the real environment.

use std::time::Duration;

pub const SUCCESS_TTL_ENV: &str = "SYNDIC_SUCCESS_TTL_MS";
pub const ERROR_TTL_ENV: &str = "SYNDIC_ERROR_TTL_MS";
pub const API_URL_ENV: &str = "SYNDIC_API_URL";
pub const API_TOKEN_ENV: &str = "SYNDIC_API_TOKEN";
pub const API_TIMEOUT_ENV: &str = "SYNDIC_API_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("Error notices must last at least as long as success notices ({error_ms}ms < {success_ms}ms)")]
    ErrorTtlTooShort { success_ms: u128, error_ms: u128 },
}

/// Settings shared by every collection controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Capacity of the request channel.
    pub mailbox_size: usize,
    /// How long a success notice stays visible.
    pub success_ttl: Duration,
    /// How long an error notice stays visible.
    pub error_ttl: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mailbox_size: 32,
            success_ttl: Duration::from_millis(3000),
            error_ttl: Duration::from_millis(5000),
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(ms) = parse_u64(&lookup, SUCCESS_TTL_ENV)? {
            config.success_ttl = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, ERROR_TTL_ENV)? {
            config.error_ttl = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.error_ttl < self.success_ttl {
            return Err(ConfigError::ErrorTtlTooShort {
                success_ms: self.success_ttl.as_millis(),
                error_ms: self.error_ttl.as_millis(),
            });
        }
        Ok(())
    }
}

/// Where the backend lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    key: API_URL_ENV,
                    value: url,
                });
            }
            config.base_url = url;
        }
        config.token = lookup(API_TOKEN_ENV).filter(|token| !token.trim().is_empty());
        if let Some(secs) = parse_u64(&lookup, API_TIMEOUT_ENV)? {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
