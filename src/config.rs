//! Client configuration.
//!
//! Defaults target a backend on `localhost:8000`; every field can be
//! overridden from the environment or with the builder methods.

use std::time::Duration;

use tracing::warn;

use crate::feed::SupersessionPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const ENV_BASE_URL: &str = "DEBATE_API_BASE_URL";
pub const ENV_IDLE_TIMEOUT: &str = "DEBATE_IDLE_TIMEOUT_SECS";
pub const ENV_DEADLINE: &str = "DEBATE_DEADLINE_SECS";
pub const ENV_INPLACE_SUPERSESSION: &str = "DEBATE_INPLACE_SUPERSESSION";

/// Configuration for talking to the debate backend.
///
/// # Example
///
/// ```ignore
/// use debate_feed::config::DebateConfig;
///
/// let config = DebateConfig::from_env()
///     .with_idle_timeout(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DebateConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Longest wait for the response headers or for the next decoded event
    pub idle_timeout: Option<Duration>,
    /// Longest a whole debate may run
    pub deadline: Option<Duration>,
    /// Where superseding responses land in the feed
    pub supersession: SupersessionPolicy,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            idle_timeout: None,
            deadline: None,
            supersession: SupersessionPolicy::AppendAtEnd,
        }
    }
}

impl DebateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_supersession(mut self, policy: SupersessionPolicy) -> Self {
        self.supersession = policy;
        self
    }

    /// Create config from the `DEBATE_*` environment variables.
    ///
    /// Unset variables keep their defaults. Numeric values that fail to
    /// parse are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }
        if let Some(secs) = env_secs(ENV_IDLE_TIMEOUT) {
            config = config.with_idle_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = env_secs(ENV_DEADLINE) {
            config = config.with_deadline(Duration::from_secs(secs));
        }
        if std::env::var(ENV_INPLACE_SUPERSESSION).is_ok() {
            config = config.with_supersession(SupersessionPolicy::InPlace);
        }

        config
    }
}

fn env_secs(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!(variable = name, "ignoring zero duration");
            None
        }
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparseable duration");
            None
        }
    }
}
