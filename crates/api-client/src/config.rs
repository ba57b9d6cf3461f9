//! Configuration for the Tradepost API client
//!
//! Supports environment-based configuration, TOML files and sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default production backend root
const DEFAULT_BASE_URL: &str = "https://api.tradepost.app/api";

/// Local development backend root
const DEVELOPMENT_BASE_URL: &str = "http://localhost:8000/api";

/// Default User-Agent header value
const DEFAULT_USER_AGENT: &str = concat!("tradepost-api-client/", env!("CARGO_PKG_VERSION"));

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (backend on localhost)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse a `TRADEPOST_ENV` value; unknown values mean production
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root, an absolute URL ending in the API mount point
    pub base_url: String,
    /// Transport timeout applied by the HTTP client
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `TRADEPOST_API_URL` or `PUBLIC_BACKEND_URL`: backend root
    /// - `TRADEPOST_ENV`: environment (development/staging/production)
    /// - `TRADEPOST_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(&lookup("TRADEPOST_ENV").unwrap_or_default());

        let base_url = lookup("TRADEPOST_API_URL")
            .or_else(|| lookup("PUBLIC_BACKEND_URL"))
            .unwrap_or_else(|| match environment {
                Environment::Development => DEVELOPMENT_BASE_URL.to_string(),
                Environment::Staging | Environment::Production => DEFAULT_BASE_URL.to_string(),
            });

        let timeout = match lookup("TRADEPOST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("invalid TRADEPOST_TIMEOUT_SECS: {raw}")))?,
            None => Duration::from_secs(30),
        };

        let config = Self {
            base_url,
            timeout,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            environment,
        }
        .normalized();

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ApiError::config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEVELOPMENT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            environment: Environment::Development,
        }
    }

    /// Create production configuration
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Builder-style method to set the backend root
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self.normalized()
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the User-Agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.len() != self.base_url.len() {
            self.base_url = trimmed.to_string();
        }
        self
    }
}
