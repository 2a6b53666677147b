//! The ordered list of sources a search fans out to.
//!
//! Sources are plain data: a base endpoint plus the [`ExtractionRule`]
//! that locates item links in that endpoint's result listing. Adding a
//! source means appending a [`SourceDescriptor`], either in code or in a
//! TOML registry file loaded with [`SourceRegistry::from_toml_str`].

use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::error::SearchError;

/// Built-in source endpoints, queried in this order.
const DEFAULT_SOURCES: &[&str] = &[
    "https://123movie.so",
    "https://fmovies.to",
    "https://putlocker.is",
    "https://gostream.is",
];

const DEFAULT_SELECTOR: &str = "div.movie-item a";
const DEFAULT_ITEM_MARKER: &str = "/movie/";
const DEFAULT_EXCLUDE_MARKERS: &[&str] = &["trailer", "preview"];

/// How to pick item links out of a source's result page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionRule {
    /// CSS selector matching anchor elements for result items.
    pub selector: String,
    /// Substring every item URL must contain (identifies detail pages).
    pub item_marker: String,
    /// Substrings that disqualify a URL (trailers, previews).
    pub exclude_markers: Vec<String>,
}

impl Default for ExtractionRule {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_owned(),
            item_marker: DEFAULT_ITEM_MARKER.to_owned(),
            exclude_markers: DEFAULT_EXCLUDE_MARKERS
                .iter()
                .map(|m| (*m).to_owned())
                .collect(),
        }
    }
}

impl ExtractionRule {
    /// Whether `url` points at an item page and is not excluded.
    pub fn accepts_url(&self, url: &str) -> bool {
        url.contains(&self.item_marker)
            && !self
                .exclude_markers
                .iter()
                .any(|marker| url.contains(marker.as_str()))
    }
}

/// One external source: where to query it and how to read its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Endpoint root, without the `/search` path.
    pub base_url: String,
    /// Short name attached to every record this source produces.
    pub label: String,
    /// How to read this source's result listing.
    pub rule: ExtractionRule,
}

impl SourceDescriptor {
    /// Create a descriptor whose label is derived from `base_url`.
    pub fn new(base_url: impl Into<String>, rule: ExtractionRule) -> Self {
        let base_url = base_url.into();
        let label = label_from_base_url(&base_url);
        Self {
            base_url,
            label,
            rule,
        }
    }

    /// Override the derived label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The search endpoint for an already-encoded query.
    pub fn search_url(&self, encoded_query: &str) -> String {
        format!(
            "{}/search?q={encoded_query}",
            self.base_url.trim_end_matches('/')
        )
    }

    fn validate(&self) -> Result<(), SearchError> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            SearchError::Config(format!("invalid base_url {:?}: {e}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "base_url {:?} must use http or https",
                self.base_url
            )));
        }
        if self.label.trim().is_empty() {
            return Err(SearchError::Config(format!(
                "source {:?} has an empty label",
                self.base_url
            )));
        }
        if self.rule.item_marker.is_empty() {
            return Err(SearchError::Config(format!(
                "source {} has an empty item_marker",
                self.label
            )));
        }
        scraper::Selector::parse(&self.rule.selector).map_err(|e| {
            SearchError::Config(format!(
                "source {} has an invalid selector {:?}: {e:?}",
                self.label, self.rule.selector
            ))
        })?;
        Ok(())
    }
}

/// Last path segment of a base URL, e.g. `https://fmovies.to` → `fmovies.to`.
pub fn label_from_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_owned()
}

/// Ordered, read-only set of sources.
///
/// Descriptors are reference-counted so each per-source task can hold
/// its own handle without copying.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Arc<SourceDescriptor>>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCES
                .iter()
                .map(|base| SourceDescriptor::new(*base, ExtractionRule::default())),
        )
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    sources: Vec<SourceEntry>,
}

#[derive(Deserialize)]
struct SourceEntry {
    base_url: String,
    label: Option<String>,
    #[serde(flatten)]
    rule: ExtractionRule,
}

impl SourceRegistry {
    /// Build a registry from descriptors, keeping their order.
    pub fn new(sources: impl IntoIterator<Item = SourceDescriptor>) -> Self {
        Self {
            sources: sources.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a registry from TOML:
    ///
    /// ```toml
    /// [[sources]]
    /// base_url = "https://fmovies.to"
    /// label = "fmovies"
    /// selector = "div.movie-item a"
    /// item_marker = "/movie/"
    /// exclude_markers = ["trailer"]
    /// ```
    ///
    /// Only `base_url` is required; the label derives from it and rule
    /// fields default to the built-in rule.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] on malformed TOML or an invalid entry.
    pub fn from_toml_str(input: &str) -> Result<Self, SearchError> {
        let file: RegistryFile = toml::from_str(input)
            .map_err(|e| SearchError::Config(format!("invalid source registry: {e}")))?;

        let registry = Self::new(file.sources.into_iter().map(|entry| {
            let descriptor = SourceDescriptor::new(entry.base_url, entry.rule);
            match entry.label {
                Some(label) => descriptor.with_label(label),
                None => descriptor,
            }
        }));
        registry.validate()?;
        Ok(registry)
    }

    /// The sources, in query order.
    pub fn list(&self) -> &[Arc<SourceDescriptor>] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Checks that the registry is non-empty and every descriptor is usable.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be registered".into(),
            ));
        }
        self.sources.iter().try_for_each(|source| source.validate())
    }
}
