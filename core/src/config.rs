//! Client configuration.

use std::time::Duration;

use crate::error::{ApiError, Result};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cachefly.com/api/2.5";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for building a `Cachefly` client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, including the version prefix.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Upper bound for a single round-trip.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// - `CACHEFLY_API_TOKEN`: API token (required)
    /// - `CACHEFLY_BASE_URL`: API root (default: production v2.5)
    /// - `CACHEFLY_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("CACHEFLY_API_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Config("CACHEFLY_API_TOKEN is required".to_string()))?;

        let base_url = lookup("CACHEFLY_BASE_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = match lookup("CACHEFLY_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ApiError::Config(format!("invalid CACHEFLY_TIMEOUT_SECS: {e}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ApiError::Config(
                "invalid CACHEFLY_TIMEOUT_SECS: must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            token: Some(token),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
