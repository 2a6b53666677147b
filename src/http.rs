//! Shared HTTP client for source requests.
//!
//! Provides a configured [`reqwest::Client`] with the fixed User-Agent and
//! per-request timeout every source request uses.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Build a [`reqwest::Client`] configured for source scraping.
///
/// The client has:
/// - Timeout from config, covering connect, send and body read
/// - The configured User-Agent
/// - Brotli and gzip decompression
///
/// The client is cheap to clone; one instance serves all sources of a
/// search concurrently.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(config.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}
