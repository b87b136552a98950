//! CLI configuration.
//!
//! Loaded via the `config` crate from an optional TOML file, then from
//! environment variables prefixed `PEAKWAVE`, with `__` separating nesting
//! levels (`PEAKWAVE__API__BASE_URL`, `PEAKWAVE__SESSION__COOKIE_FILE`).

use peakwave_api::ApiConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration composed from library configs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Members API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the session cookie is kept between invocations.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// File holding the session cookie.
    #[serde(default = "default_cookie_file")]
    pub cookie_file: PathBuf,
}

fn default_cookie_file() -> PathBuf {
    PathBuf::from(".peakwave-session")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_file: default_cookie_file(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `file` (if given) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or a value has
    /// the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(file, config::Environment::with_prefix("PEAKWAVE"))
    }

    fn load_with(
        file: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
