//! Client configuration.

use std::fmt;

use crate::error::MbtaError;

/// Default base URL for the MBTA V3 API.
pub const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MBTA_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MBTA_BASE_URL";

/// An MBTA API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Result<Self, MbtaError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(MbtaError::MissingApiKey);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Key sent as `api_key` on every request
    pub api_key: ApiKey,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum requests in flight at once
    pub max_concurrent: usize,
}

impl ClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Read `MBTA_API_KEY` (required) and `MBTA_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, MbtaError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MbtaError> {
        let api_key = ApiKey::new(lookup(API_KEY_ENV).unwrap_or_default())?;
        let mut config = Self::new(api_key);
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    /// Set a custom base URL (for testing or a proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests. Zero is treated as one.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }
}
