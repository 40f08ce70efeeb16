//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, Result};

/// Production host of the member data service.
pub const DEFAULT_BASE_URL: &str = "https://members-ng.iracing.com";

/// Login path relative to the base URL.
pub const DEFAULT_AUTH_PATH: &str = "/auth";

/// Presigned links are treated as expired this many seconds before the
/// upstream-declared expiry, to absorb clock skew.
pub const DEFAULT_LINK_EXPIRY_MARGIN_SECS: u64 = 60;

/// Largest accepted link expiry margin (one day).
pub const MAX_LINK_EXPIRY_MARGIN_SECS: u64 = 86_400;

const ENV_BASE_URL: &str = "IRACING_DATA_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "IRACING_DATA_TIMEOUT_SECS";
const ENV_LINK_MARGIN_SECS: &str = "IRACING_DATA_LINK_MARGIN_SECS";

/// Settings shared by the client and its default transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL that relative request targets are resolved against
    pub base_url: String,
    /// Path of the login endpoint
    pub auth_path: String,
    /// Safety margin subtracted from presigned link expiry
    pub link_expiry_margin_secs: u64,
    /// Request timeout for the default transport (transport default when unset)
    pub timeout_secs: Option<u64>,
    /// User agent sent by the default transport
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_path: DEFAULT_AUTH_PATH.to_string(),
            link_expiry_margin_secs: DEFAULT_LINK_EXPIRY_MARGIN_SECS,
            timeout_secs: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration pointing at a different host (mock servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Load defaults overridden by `IRACING_DATA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            config.timeout_secs = Some(parse_secs(ENV_TIMEOUT_SECS, &raw)?);
        }
        if let Ok(raw) = std::env::var(ENV_LINK_MARGIN_SECS) {
            config.link_expiry_margin_secs = parse_secs(ENV_LINK_MARGIN_SECS, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to issue requests.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for a non-http(s) base URL, an empty auth
    /// path or a link expiry margin above [`MAX_LINK_EXPIRY_MARGIN_SECS`].
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::config(format!(
                "base URL must use http or https, got '{}'",
                base.scheme()
            )));
        }
        if self.auth_path.trim().is_empty() {
            return Err(ApiError::config("auth path must not be empty"));
        }
        if self.link_expiry_margin_secs > MAX_LINK_EXPIRY_MARGIN_SECS {
            return Err(ApiError::config(format!(
                "link expiry margin must be at most {} seconds, got {}",
                MAX_LINK_EXPIRY_MARGIN_SECS, self.link_expiry_margin_secs
            )));
        }
        Ok(())
    }

    /// Parsed base URL.
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Absolute URL of the login endpoint.
    pub fn auth_url(&self) -> Result<Url> {
        Ok(self.base_url()?.join(&self.auth_path)?)
    }

    /// Safety margin as a [`chrono::TimeDelta`], saturating at
    /// [`TimeDelta::MAX`](chrono::TimeDelta::MAX) for unvalidated configs.
    pub fn link_expiry_margin(&self) -> chrono::TimeDelta {
        i64::try_from(self.link_expiry_margin_secs)
            .ok()
            .and_then(chrono::TimeDelta::try_seconds)
            .unwrap_or(chrono::TimeDelta::MAX)
    }

    /// Request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ApiError::config(format!("{} must be a whole number of seconds: {}", name, e)))
}
