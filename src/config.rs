//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the result cap, the per-source request
//! timeout and the User-Agent sent to every source.

use serde::Deserialize;

use crate::error::SearchError;

/// Default cap on the number of results a search returns.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Default per-source HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Configuration for a search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour. Missing fields fall back to the
/// defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results to return after deduplication.
    pub max_results: usize,
    /// Per-source HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_ms` must be greater than 0
    /// - `user_agent` must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(SearchError::Config(
                "timeout_ms must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}
