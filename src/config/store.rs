//! Order store connection settings.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use super::ConfigError;

/// Environment variable holding the store endpoint URL.
pub const STORE_ENDPOINT_ENV_VAR: &str = "ORDERDESK_STORE_ENDPOINT";
/// Environment variable holding the request timeout in seconds.
pub const STORE_TIMEOUT_ENV_VAR: &str = "ORDERDESK_STORE_TIMEOUT";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the order sheet lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Web app URL; serves GET for rows and POST for edits.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: BTreeMap::new(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    ///
    /// - `ORDERDESK_STORE_ENDPOINT`: Required store URL
    /// - `ORDERDESK_STORE_TIMEOUT`: Optional timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = std::env::var(STORE_ENDPOINT_ENV_VAR)
            .map_err(|_| ConfigError::Missing(STORE_ENDPOINT_ENV_VAR.to_string()))?;

        let timeout_secs = std::env::var(STORE_TIMEOUT_ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            timeout_secs,
            headers: BTreeMap::new(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout, rounded up to whole seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Reject settings that cannot reach a store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("store.endpoint".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "store.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.endpoint.is_empty());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::default()
            .with_endpoint("https://script.example.com/exec")
            .with_timeout(Duration::from_secs(10))
            .with_header("Authorization", "Bearer token");

        assert_eq!(config.endpoint, "https://script.example.com/exec");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(
            config.headers.get("Authorization").map(String::as_str),
            Some("Bearer token")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_endpoint_and_zero_timeout() {
        assert!(matches!(
            StoreConfig::default().validate(),
            Err(ConfigError::Missing(_))
        ));
        let config = StoreConfig::default()
            .with_endpoint("http://localhost")
            .with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_sub_second_timeout_rounds_up() {
        let config = StoreConfig::default()
            .with_endpoint("http://localhost")
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_secs, 1);
        assert!(config.validate().is_ok());

        let config = config.with_timeout(Duration::from_millis(2500));
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(STORE_ENDPOINT_ENV_VAR, "http://localhost:9000/exec");
        std::env::set_var(STORE_TIMEOUT_ENV_VAR, "5");

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/exec");
        assert_eq!(config.timeout_secs, 5);

        std::env::remove_var(STORE_ENDPOINT_ENV_VAR);
        std::env::remove_var(STORE_TIMEOUT_ENV_VAR);
        assert!(StoreConfig::from_env().is_err());
    }
}
