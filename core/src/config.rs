//! Startup configuration, read once from the environment.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_ERROR_TIMEOUT: Duration = Duration::from_millis(3000);

pub const API_URL_VAR: &str = "TODO_API_URL";
pub const OWNER_ID_VAR: &str = "TODO_OWNER_ID";
pub const ERROR_TIMEOUT_VAR: &str = "TODO_ERROR_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// `None` when unset, unparsable or zero. The UI then shows a setup
    /// warning and makes no requests.
    pub owner_id: Option<u64>,
    /// How long an error banner stays up before clearing itself.
    pub error_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            owner_id: None,
            error_timeout: DEFAULT_ERROR_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let owner_id = lookup(OWNER_ID_VAR).and_then(|raw| parse_owner_id(&raw));

        let error_timeout = match lookup(ERROR_TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(var = ERROR_TIMEOUT_VAR, value = %raw, "ignoring invalid error timeout");
                    DEFAULT_ERROR_TIMEOUT
                }
            },
            None => DEFAULT_ERROR_TIMEOUT,
        };

        Self {
            base_url,
            owner_id,
            error_timeout,
        }
    }

    pub fn with_owner_id(mut self, owner_id: u64) -> Self {
        self.owner_id = (owner_id != 0).then_some(owner_id);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Zero counts as "not configured".
pub fn parse_owner_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|&id| id != 0)
}
