// Shared transport configuration for building reqwest::Client instances.
//
// Both the Spacecat and hosting clients share timeout and user-agent
// settings through this module, avoiding duplicated builder logic.

use std::time::Duration;

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

impl TransportConfig {
    /// Create a config with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("a11y-autofix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used to inject per-service auth headers (`x-api-key` for Spacecat,
    /// the captured SSO authorization for the hosting API).
    pub fn build_client_with_headers(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("a11y-autofix/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
