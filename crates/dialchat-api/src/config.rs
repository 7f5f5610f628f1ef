//! Configuration types for the chat API client

use crate::error::{ApiError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Chat API client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the chat server, e.g. `http://localhost:3000`
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ApiConfig {
    /// Create a config for `base_url` with the default timeout
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Check that the base URL is usable
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the URL is empty or not http(s)
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ApiError::Config("api.base_url must not be empty".into()));
        }
        let host = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"))
            .ok_or_else(|| {
                ApiError::Config(format!(
                    "api.base_url must use http:// or https://, got '{base}'"
                ))
            })?;
        if host.trim_matches('/').is_empty() {
            return Err(ApiError::Config(format!(
                "api.base_url has no host: '{base}'"
            )));
        }
        Ok(())
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without trailing slashes
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Absolute URL of an API endpoint path such as `/messages`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    /// Absolute URL of a server-supplied attachment locator
    #[must_use]
    pub fn attachment_url(&self, locator: &str) -> String {
        if locator.starts_with('/') {
            format!("{}{}", self.base(), locator)
        } else {
            format!("{}{}", self.base_url.trim(), locator)
        }
    }
}
