//! Client configuration and credentials

use crate::{MoovError, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.moov.io";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the public key
pub const ENV_PUBLIC_KEY: &str = "MOOV_PUBLIC_KEY";

/// Environment variable holding the secret key
pub const ENV_SECRET_KEY: &str = "MOOV_SECRET_KEY";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "MOOV_BASE_URL";

/// API key pair, sent as HTTP Basic credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Public key, used as the Basic auth user name
    pub public_key: String,
    /// Secret key, used as the Basic auth password
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from a key pair
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read `MOOV_PUBLIC_KEY` and `MOOV_SECRET_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build credentials from any key lookup, e.g. a map in tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_key = lookup(ENV_PUBLIC_KEY).unwrap_or_default();
        let secret_key = lookup(ENV_SECRET_KEY).unwrap_or_default();

        if public_key.is_empty() || secret_key.is_empty() {
            return Err(MoovError::config(format!(
                "Missing credentials: {} and {} must be set",
                ENV_PUBLIC_KEY, ENV_SECRET_KEY
            )));
        }

        Ok(Self::new(public_key, secret_key))
    }
}

/// Immutable configuration shared by every call of a client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// API key pair
    pub credentials: Credentials,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the default base URL
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: format!("moov-rs/{}", crate::VERSION),
        }
    }

    /// Load credentials and an optional base URL override from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;
        let mut config = Self::new(credentials);
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|url| !url.is_empty()) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(MoovError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(MoovError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.credentials.public_key.is_empty() || self.credentials.secret_key.is_empty() {
            return Err(MoovError::config("Public and secret keys cannot be empty"));
        }

        Ok(())
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new(Credentials::new("pk", "sk"));
        assert_eq!(config.base_url, "https://api.moov.io");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("moov-rs/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MOOV_PUBLIC_KEY", "pk"),
            ("MOOV_SECRET_KEY", "sk"),
            ("MOOV_BASE_URL", "http://localhost:8080"),
        ]))
        .unwrap();

        assert_eq!(config.credentials, Credentials::new("pk", "sk"));
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_credentials() {
        let result = Credentials::from_lookup(lookup(&[("MOOV_PUBLIC_KEY", "pk")]));
        let error = result.unwrap_err().to_string();
        assert!(error.contains("MOOV_SECRET_KEY"), "got: {}", error);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig::new(Credentials::new("pk", "sk")).with_base_url("api.moov.io");
        assert!(config.validate().is_err());

        let config = ClientConfig::new(Credentials::new("pk", "sk")).with_base_url("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_keys() {
        let config = ClientConfig::new(Credentials::new("pk", ""));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secret_is_redacted() {
        let debug = format!("{:?}", Credentials::new("pk_live", "sk_live_secret"));
        assert!(debug.contains("pk_live"));
        assert!(!debug.contains("sk_live_secret"));
    }
}
