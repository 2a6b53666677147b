//! # litestream-search
//!
//! Multi-source movie search aggregation.
//!
//! A free-text query is sent to several independent streaming-index sites
//! at once. Each site's result listing is scraped with CSS selectors, and
//! the extracted items are merged into one deduplicated, capped list.
//!
//! ## Design
//!
//! - Sources are data: an ordered [`SourceRegistry`] of base URLs and
//!   extraction rules, loadable from TOML
//! - One spawned task per source, joined before aggregation
//! - Per-source fault isolation: a source that times out, errors or serves
//!   garbage contributes nothing and never fails the search
//! - Results keep registry order, deduplicated by title (first wins) and
//!   capped at [`SearchConfig::max_results`]
//! - [`SearchSession`] exposes Idle/Loading/Done state and drops results
//!   of searches superseded by a newer one
//!
//! ## Security
//!
//! - Search queries are logged only at trace level
//! - Fetched markup is never executed, only parsed

pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod registry;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use fetcher::{Fetcher, HttpFetcher};
pub use orchestrator::search::Searcher;
pub use orchestrator::session::{SearchSession, SearchState};
pub use registry::{ExtractionRule, SourceDescriptor, SourceRegistry};
pub use types::{CandidateRecord, Document, ResultSet, SearchReport, SourceOutcome};

/// Search the given sources concurrently.
///
/// Deduplicates by title, keeps registry order and returns up to
/// `config.max_results` results. A blank query returns an empty set
/// without any network traffic.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` or `registry` is invalid.
/// Failures of individual sources are logged and never returned.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> litestream_search::Result<()> {
/// let config = litestream_search::SearchConfig::default();
/// let registry = litestream_search::SourceRegistry::default();
/// let results = litestream_search::search("dune", &config, &registry).await?;
/// for movie in &results {
///     println!("{} ({}): {}", movie.title, movie.source_label, movie.target_url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    config: &SearchConfig,
    registry: &SourceRegistry,
) -> Result<ResultSet> {
    let searcher = Searcher::new(config.clone(), registry.clone())?;
    Ok(searcher.search(query).await)
}

/// Search the built-in sources with the default configuration.
///
/// Convenience wrapper around [`search`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str) -> Result<ResultSet> {
    search(query, &SearchConfig::default(), &SourceRegistry::default()).await
}
