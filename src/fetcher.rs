//! Fetching a source's result page.
//!
//! [`Fetcher`] is the seam between the orchestrator and the network:
//! [`HttpFetcher`] issues real requests, tests substitute scripted
//! implementations.

use std::future::Future;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::registry::SourceDescriptor;
use crate::types::Document;

/// Retrieves the result page of one source for one encoded query.
///
/// Implementations make exactly one attempt per call: no retries, no
/// shared mutable state. All implementations must be `Send + Sync` so
/// one instance can serve every per-source task of a search.
pub trait Fetcher: Send + Sync {
    /// Fetch `source`'s result page for `encoded_query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Fetch`] carrying the source label on network
    /// failure, timeout, non-success status or an unreadable body.
    fn fetch(
        &self,
        source: &SourceDescriptor,
        encoded_query: &str,
    ) -> impl Future<Output = Result<Document, SearchError>> + Send;
}

/// [`Fetcher`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpFetcher {
    /// Build a fetcher using the timeout and User-Agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: http::build_client(config)?,
            timeout_ms: config.timeout_ms,
        })
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("timed out after {} ms", self.timeout_ms)
        } else {
            err.to_string()
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        encoded_query: &str,
    ) -> Result<Document, SearchError> {
        let url = source.search_url(encoded_query);
        tracing::trace!(source = %source.label, %url, "fetching source");

        let fail = |reason: String| SearchError::Fetch {
            label: source.label.clone(),
            reason,
        };

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| fail(format!("request failed: {}", self.describe(&e))))?;

        // Unfollowed 3xx and 1xx count as failures, not only 4xx/5xx.
        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP error: {status}")));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| fail(format!("response read failed: {}", self.describe(&e))))?;

        tracing::trace!(source = %source.label, bytes = body.len(), "source response received");

        Ok(Document {
            url: final_url,
            body,
        })
    }
}
