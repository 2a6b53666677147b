//! Error types for the litestream-search crate.
//!
//! Per-source errors ([`SearchError::Fetch`], [`SearchError::Extraction`])
//! never escape a search: the orchestrator records them as a failed
//! [`crate::types::SourceOutcome`] and carries on with the other sources.
//! Only [`SearchError::Config`] reaches callers, at construction time.

/// Errors that can occur while configuring or running a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Fetching one source's result page failed (network, timeout,
    /// non-success status, or unreadable body).
    #[error("fetch failed for {label}: {reason}")]
    Fetch {
        /// Label of the source that failed.
        label: String,
        /// Underlying cause.
        reason: String,
    },

    /// A source's extraction rule could not be applied to its document.
    #[error("extraction failed for {label}: {reason}")]
    Extraction {
        /// Label of the source that failed.
        label: String,
        /// Underlying cause.
        reason: String,
    },

    /// Invalid search configuration or source registry.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Label of the source this error belongs to, if any.
    pub fn source_label(&self) -> Option<&str> {
        match self {
            Self::Fetch { label, .. } | Self::Extraction { label, .. } => Some(label),
            Self::Config(_) => None,
        }
    }
}

/// Convenience type alias for litestream-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
