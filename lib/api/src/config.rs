//! Members API connection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the members API lives.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin serving `/api/...` (e.g. "https://members.peakwave.example").
    /// Default: "http://localhost:5000"
    #[serde(default = "default_base_url")]
    base_url: String,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    user_agent: String,
    /// Whole-request timeout in seconds. Default: none, requests wait for
    /// the server however long its provider checks take.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_agent() -> String {
    concat!("peakwave-dashboard/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given origin.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the API origin.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sets a whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Returns the request timeout, if one was configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
