//! Adapter construction settings.

use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TIMEOUT_MILLIS: u64 = 5000;

/// Environment variable read by `AdapterConfig::from_env`.
pub const TIMEOUT_ENV: &str = "HTTP_ADAPTER_TIMEOUT_MS";

/// Settings fixed for the lifetime of an `HttpAdapter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Deadline forwarded to the transport on every call.
    pub timeout_millis: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }
}

impl AdapterConfig {
    pub fn with_timeout_millis(timeout_millis: u64) -> Self {
        Self { timeout_millis }
    }

    /// Read the timeout from `HTTP_ADAPTER_TIMEOUT_MS`, defaulting when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(TIMEOUT_ENV) {
            None => Ok(Self::default()),
            Some(value) => {
                let timeout_millis = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidTimeout { value, source })?;
                Ok(Self { timeout_millis })
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid HTTP_ADAPTER_TIMEOUT_MS value {value:?}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_five_seconds() {
        assert_eq!(AdapterConfig::default().timeout_millis, 5000);
    }

    #[test]
    fn deserializes_with_default_timeout() {
        let config: AdapterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timeout_millis, DEFAULT_TIMEOUT_MILLIS);
        let config: AdapterConfig = serde_json::from_str(r#"{"timeoutMillis":60000}"#).unwrap();
        assert_eq!(config.timeout_millis, 60000);
    }

    #[test]
    fn lookup_without_variable_uses_default() {
        let config = AdapterConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn lookup_parses_timeout() {
        let config = AdapterConfig::from_lookup(|_| Some(" 250 ".to_string())).unwrap();
        assert_eq!(config.timeout_millis, 250);
    }

    #[test]
    fn lookup_rejects_non_numeric_timeout() {
        let err = AdapterConfig::from_lookup(|_| Some("soon".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { ref value, .. } if value == "soon"));
        assert!(err.to_string().contains("HTTP_ADAPTER_TIMEOUT_MS"));
    }
}
