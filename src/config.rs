//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is missing or a value has the wrong type.
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),

    /// `ACCOUNT_SERVICE_URL` is not an absolute http(s) URL.
    #[error("Invalid ACCOUNT_SERVICE_URL: {0}")]
    InvalidAccountServiceUrl(String),
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `ACCOUNT_SERVICE_URL` (required): base URL of the downstream account service
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8080
/// - `ACCOUNT_SERVICE_TIMEOUT_SECS` (optional): timeout for outbound calls, none if unset
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub account_service_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub account_service_timeout_secs: Option<u64>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `ACCOUNT_SERVICE_URL` is missing or not a valid http(s) URL
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Build a config from arbitrary key/value pairs.
    ///
    /// Field names are converted the same way as in [`Config::from_env`]:
    /// `account_service_url` -> `ACCOUNT_SERVICE_URL`.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;
        config.account_service_base_url()?;
        Ok(config)
    }

    /// Parsed and validated base URL of the account service.
    pub fn account_service_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.account_service_url)
            .map_err(|e| ConfigError::InvalidAccountServiceUrl(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidAccountServiceUrl(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }

    pub fn account_service_timeout(&self) -> Option<Duration> {
        self.account_service_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_vars(vars(&[("ACCOUNT_SERVICE_URL", "http://localhost:8081")])).unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.account_service_timeout(), None);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(vars(&[
            ("ACCOUNT_SERVICE_URL", "https://accounts.internal"),
            ("SERVER_PORT", "9000"),
            ("ACCOUNT_SERVICE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 9000);
        assert_eq!(
            config.account_service_timeout(),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_missing_url_rejected() {
        let err = Config::from_vars(vars(&[("SERVER_PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = Config::from_vars(vars(&[("ACCOUNT_SERVICE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAccountServiceUrl(_)));

        let err =
            Config::from_vars(vars(&[("ACCOUNT_SERVICE_URL", "ftp://accounts")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAccountServiceUrl(_)));
    }
}
