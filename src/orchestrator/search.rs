//! Core search orchestrator: concurrent per-source fan-out, extract, aggregate.
//!
//! Every source gets its own spawned task running fetch-then-extract.
//! Failures stay inside their task as a tagged result; the join step
//! reassembles outcomes in registry order before aggregation, so output
//! does not depend on which source answered first.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extract::extract;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::query;
use crate::registry::{SourceDescriptor, SourceRegistry};
use crate::types::{CandidateRecord, ResultSet, SearchReport, SourceOutcome};

use super::aggregate::aggregate;

/// Runs searches against a fixed source registry.
///
/// Cheap to share behind an [`Arc`]; every call to [`Searcher::search`]
/// is independent.
#[derive(Debug)]
pub struct Searcher<F = HttpFetcher> {
    fetcher: Arc<F>,
    registry: SourceRegistry,
    config: SearchConfig,
}

impl Searcher<HttpFetcher> {
    /// Build a searcher that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` or `registry` is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: SearchConfig, registry: SourceRegistry) -> Result<Self, SearchError> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, registry, fetcher)
    }
}

impl<F: Fetcher + 'static> Searcher<F> {
    /// Build a searcher around a custom [`Fetcher`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` or `registry` is invalid.
    pub fn with_fetcher(
        config: SearchConfig,
        registry: SourceRegistry,
        fetcher: F,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        registry.validate()?;
        Ok(Self {
            fetcher: Arc::new(fetcher),
            registry,
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Search every source for `raw` and return the aggregated results.
    ///
    /// Never fails: a source that errors contributes nothing. A blank
    /// query returns an empty set without contacting any source.
    pub async fn search(&self, raw: &str) -> ResultSet {
        self.search_report(raw).await.results
    }

    /// Like [`Searcher::search`], but also reports per-source outcomes.
    ///
    /// # Pipeline
    ///
    /// 1. Reject blank queries (no outcomes, empty results)
    /// 2. Encode the query once
    /// 3. Spawn one fetch-then-extract task per source
    /// 4. Join all tasks; a failed or panicked task becomes an empty list
    /// 5. Aggregate the lists in registry order
    pub async fn search_report(&self, raw: &str) -> SearchReport {
        if query::is_blank(raw) {
            tracing::trace!("blank query, skipping search");
            return SearchReport::default();
        }

        tracing::trace!(query = raw, sources = self.registry.len(), "search started");
        let encoded: Arc<str> = query::encode(raw).into();

        // 1. Fan out, one task per source.
        let handles: Vec<_> = self
            .registry
            .list()
            .iter()
            .map(|source| {
                let fetcher = Arc::clone(&self.fetcher);
                let source = Arc::clone(source);
                let encoded = Arc::clone(&encoded);
                tokio::spawn(async move { run_source(fetcher.as_ref(), &source, &encoded).await })
            })
            .collect();

        let joined = futures::future::join_all(handles).await;

        // 2. Collect per-source lists in registry order.
        let mut streams: Vec<Vec<CandidateRecord>> = Vec::with_capacity(joined.len());
        let mut outcomes: Vec<SourceOutcome> = Vec::with_capacity(joined.len());

        for (source, joined) in self.registry.list().iter().zip(joined) {
            let outcome = joined.unwrap_or_else(|e| {
                Err(SearchError::Fetch {
                    label: source.label.clone(),
                    reason: format!("task failed: {e}"),
                })
            });

            match outcome {
                Ok(records) => {
                    tracing::debug!(source = %source.label, count = records.len(), "source returned candidates");
                    outcomes.push(SourceOutcome::Succeeded {
                        source: source.label.clone(),
                        candidates: records.len(),
                    });
                    streams.push(records);
                }
                Err(err) => {
                    tracing::warn!(source = %source.label, error = %err, "source failed");
                    outcomes.push(SourceOutcome::Failed {
                        source: source.label.clone(),
                        reason: err.to_string(),
                    });
                    streams.push(Vec::new());
                }
            }
        }

        // 3. Dedup by title and cap.
        let results = aggregate(streams, self.config.max_results);
        tracing::debug!(count = results.len(), "search complete");

        SearchReport { results, outcomes }
    }
}

/// Fetch one source and extract its candidates.
async fn run_source<F: Fetcher>(
    fetcher: &F,
    source: &SourceDescriptor,
    encoded_query: &str,
) -> Result<Vec<CandidateRecord>, SearchError> {
    let doc = fetcher.fetch(source, encoded_query).await?;
    extract(&doc, source)
}
