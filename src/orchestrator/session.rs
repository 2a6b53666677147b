//! Loading/done signalling for a caller that issues overlapping searches.
//!
//! A [`SearchSession`] publishes its [`SearchState`] on a
//! [`tokio::sync::watch`] channel. Each non-blank submission takes a new
//! generation number; a search that finishes after a newer one has
//! started is discarded instead of overwriting the newer state.
//!
//! ```text
//! ┌──────┐  non-blank query  ┌─────────┐  latest search ends  ┌──────┐
//! │ Idle ├──────────────────►│ Loading ├─────────────────────►│ Done │
//! └──────┘                   └────▲────┘                      └──┬───┘
//!                                 └─────────── new query ────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::fetcher::{Fetcher, HttpFetcher};
use crate::query;
use crate::types::ResultSet;

use super::search::Searcher;

/// Observable state of a [`SearchSession`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search has been submitted yet.
    #[default]
    Idle,
    /// The search with this generation is in flight.
    Loading { generation: u64 },
    /// The search with this generation finished.
    Done { generation: u64, results: ResultSet },
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Results of a finished search, if any.
    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            Self::Done { results, .. } => Some(results),
            _ => None,
        }
    }
}

/// Serialises result delivery for a caller that may submit searches
/// faster than they complete.
#[derive(Debug)]
pub struct SearchSession<F = HttpFetcher> {
    searcher: Searcher<F>,
    generation: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl<F: Fetcher + 'static> SearchSession<F> {
    pub fn new(searcher: Searcher<F>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            searcher,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Generation of the most recent non-blank submission (0 before any).
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run a search and publish its outcome.
    ///
    /// Returns `None` without touching the state for a blank query, and
    /// `None` when a newer submission started before this one finished.
    pub async fn submit(&self, query: &str) -> Option<ResultSet> {
        if query::is_blank(query) {
            tracing::trace!("blank query, session state unchanged");
            return None;
        }

        // Bumping the generation and publishing Loading share the channel's
        // lock with the stale check below, so they cannot interleave.
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Loading { generation };
        });

        let results = self.searcher.search(query).await;

        // A newer submission either replaces our Done, or has already made
        // us stale.
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = SearchState::Done {
                generation,
                results: results.clone(),
            };
            true
        });

        if published {
            Some(results)
        } else {
            tracing::debug!(
                generation,
                latest = self.current_generation(),
                "discarding stale search result"
            );
            None
        }
    }

    /// Run [`SearchSession::submit`] on the tokio runtime, off the caller's task.
    pub fn spawn(self: &Arc<Self>, query: impl Into<String>) -> JoinHandle<Option<ResultSet>> {
        let session = Arc::clone(self);
        let query = query.into();
        tokio::spawn(async move { session.submit(&query).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::error::SearchError;
    use crate::registry::{ExtractionRule, SourceDescriptor, SourceRegistry};
    use crate::types::Document;
    use std::time::Duration;
    use url::Url;

    /// Echoes the query back as a single item; queries starting with
    /// `slow` take a while, `fail` errors.
    #[derive(Debug)]
    struct EchoFetcher;

    impl Fetcher for EchoFetcher {
        async fn fetch(
            &self,
            source: &SourceDescriptor,
            encoded_query: &str,
        ) -> Result<Document, SearchError> {
            if encoded_query.starts_with("fail") {
                return Err(SearchError::Fetch {
                    label: source.label.clone(),
                    reason: "connection refused".into(),
                });
            }
            if encoded_query.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Ok(Document {
                url: Url::parse(&source.search_url(encoded_query)).expect("url"),
                body: format!(
                    r#"<div class="movie-item"><a href="/movie/{encoded_query}">{encoded_query}</a></div>"#
                ),
            })
        }
    }

    fn session() -> Arc<SearchSession<EchoFetcher>> {
        let registry = SourceRegistry::new([SourceDescriptor::new(
            "https://a.example",
            ExtractionRule::default(),
        )]);
        let searcher = Searcher::with_fetcher(SearchConfig::default(), registry, EchoFetcher)
            .expect("valid searcher");
        Arc::new(SearchSession::new(searcher))
    }

    #[tokio::test]
    async fn starts_idle() {
        let session = session();
        assert_eq!(session.state(), SearchState::Idle);
        assert_eq!(session.current_generation(), 0);
    }

    #[tokio::test]
    async fn blank_query_leaves_state_idle() {
        let session = session();
        assert!(session.submit("   ").await.is_none());
        assert_eq!(session.state(), SearchState::Idle);
        assert_eq!(session.current_generation(), 0);
    }

    #[tokio::test]
    async fn submit_moves_to_done() {
        let session = session();
        let results = session.submit("dune").await.expect("latest search");
        assert_eq!(results.len(), 1);
        assert_eq!(results.as_slice()[0].title, "dune");

        match session.state() {
            SearchState::Done {
                generation,
                results,
            } => {
                assert_eq!(generation, 1);
                assert_eq!(results.len(), 1);
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn total_failure_still_reaches_done() {
        let session = session();
        let results = session.submit("fail").await.expect("latest search");
        assert!(results.is_empty());
        assert!(session.state().results().is_some_and(ResultSet::is_empty));
    }

    #[tokio::test]
    async fn loading_is_observable() {
        let session = session();
        let mut rx = session.subscribe();
        let handle = session.spawn("slow");

        rx.changed().await.expect("state change");
        assert!(rx.borrow_and_update().is_loading());

        rx.changed().await.expect("state change");
        assert!(rx.borrow_and_update().results().is_some());
        assert!(handle.await.expect("join").is_some());
    }

    #[tokio::test]
    async fn stale_result_does_not_overwrite_newer_one() {
        let session = session();
        let slow = session.spawn("slow-first");
        // Let the slow search publish Loading before the fast one starts.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = session.submit("fast").await;

        assert!(fast.is_some());
        assert!(slow.await.expect("join").is_none());

        match session.state() {
            SearchState::Done {
                generation,
                results,
            } => {
                assert_eq!(generation, 2);
                assert_eq!(results.as_slice()[0].title, "fast");
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn overlapping_submissions_settle_on_latest_generation() {
        let session = session();
        let handles: Vec<_> = (0..16)
            .map(|i| session.spawn(format!("query-{i}")))
            .collect();

        let mut published = 0;
        for handle in handles {
            if handle.await.expect("join").is_some() {
                published += 1;
            }
        }

        assert!(published >= 1);
        assert_eq!(session.current_generation(), 16);
        match session.state() {
            SearchState::Done { generation, .. } => assert_eq!(generation, 16),
            other => panic!("expected Done, got {other:?}"),
        }
    }
}
