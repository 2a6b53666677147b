//! Core types for fetched documents, extracted records and result sets.

use serde::{Deserialize, Serialize};
use url::Url;

/// One item extracted from a source's result listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Display title, trimmed and whitespace-collapsed. Never empty.
    pub title: String,
    /// Absolute URL of the item's detail page.
    pub target_url: String,
    /// Label of the source that produced this record.
    pub source_label: String,
}

impl CandidateRecord {
    /// Convenience constructor.
    pub fn new(
        title: impl Into<String>,
        target_url: impl Into<String>,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            target_url: target_url.into(),
            source_label: source_label.into(),
        }
    }
}

/// A fetched result page, ready for extraction.
///
/// Holds the raw markup rather than a parsed tree: parsed HTML is not
/// `Send`, so parsing happens inside the synchronous extractor.
#[derive(Debug, Clone)]
pub struct Document {
    /// Final URL of the response, used to resolve relative links.
    pub url: Url,
    /// Response body.
    pub body: String,
}

/// The aggregated outcome of one search: unique by title, capped in length.
///
/// Serializes as a plain list. Not deserializable: only the aggregator
/// builds result sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<CandidateRecord>);

impl ResultSet {
    /// An empty result set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: Vec<CandidateRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateRecord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CandidateRecord] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<CandidateRecord> {
        self.0
    }
}

impl IntoIterator for ResultSet {
    type Item = CandidateRecord;
    type IntoIter = std::vec::IntoIter<CandidateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CandidateRecord;
    type IntoIter = std::slice::Iter<'a, CandidateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// What happened to one source during a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source was fetched and its page extracted.
    Succeeded {
        /// Source label.
        source: String,
        /// Number of candidates the extractor kept.
        candidates: usize,
    },
    /// The source contributed nothing because fetch or extraction failed.
    Failed {
        /// Source label.
        source: String,
        /// Display form of the underlying error.
        reason: String,
    },
}

impl SourceOutcome {
    /// Label of the source this outcome describes.
    pub fn source(&self) -> &str {
        match self {
            Self::Succeeded { source, .. } | Self::Failed { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// A result set plus one [`SourceOutcome`] per source, in registry order.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// Aggregated results, as [`crate::Searcher::search`] returns them.
    pub results: ResultSet,
    /// One entry per registered source, in registry order. Empty for a
    /// blank query.
    pub outcomes: Vec<SourceOutcome>,
}

impl SearchReport {
    /// True when every source failed. Distinguishes total failure from a
    /// query that matched nothing, which both yield an empty result set.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| !o.is_success())
    }
}
