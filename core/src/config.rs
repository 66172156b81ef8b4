//! Client configuration.
//!
//! Defaults target the public friends service. `from_env` lets deployments and
//! tests point the client elsewhere without code changes.

use std::time::Duration;

use crate::error::ConfigError;

pub const FRIENDS_SERVICE: &str = "https://friends-public-service-prod.ol.epicgames.com";

pub const BASE_URL_VAR: &str = "FRIENDS_SERVICE_URL";
pub const TIMEOUT_VAR: &str = "FRIENDS_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root; a trailing `/` is ignored.
    pub base_url: String,
    /// Whole-call timeout handed to the transport. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Larger response bodies are dropped; the status still applies.
    pub max_body_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: FRIENDS_SERVICE.to_string(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("friends-core/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Read overrides from `FRIENDS_SERVICE_URL` and `FRIENDS_TIMEOUT_SECS`.
    ///
    /// A timeout of `0` disables the timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl {
                    var: BASE_URL_VAR,
                    value: url,
                });
            }
            config.base_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}
