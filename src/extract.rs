//! Extracting candidate records from a fetched result page.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::SearchError;
use crate::registry::SourceDescriptor;
use crate::types::{CandidateRecord, Document};

/// Apply `source`'s extraction rule to `doc`.
///
/// Every element matched by the rule's selector yields a record when:
/// - its text (trimmed, whitespace-collapsed) is non-empty,
/// - its `href` resolves to an absolute URL against the document's base
///   (the first `<base href>`, else the document URL),
/// - that URL contains the item marker and no exclusion marker.
///
/// Elements failing any check are skipped. Records keep document order.
///
/// # Errors
///
/// Returns [`SearchError::Extraction`] only when the rule's selector is
/// not valid CSS. Malformed markup never errors.
pub fn extract(
    doc: &Document,
    source: &SourceDescriptor,
) -> Result<Vec<CandidateRecord>, SearchError> {
    let selector = Selector::parse(&source.rule.selector).map_err(|e| SearchError::Extraction {
        label: source.label.clone(),
        reason: format!("invalid selector {:?}: {e:?}", source.rule.selector),
    })?;

    let html = Html::parse_document(&doc.body);
    let base = base_url(&html, &doc.url);

    let records: Vec<CandidateRecord> = html
        .select(&selector)
        .filter_map(|element| candidate(element, &base, source))
        .collect();

    tracing::debug!(source = %source.label, count = records.len(), "candidates extracted");
    Ok(records)
}

/// The URL relative links resolve against: the first `<base href>`,
/// itself resolved against the document URL, or the document URL.
fn base_url(html: &Html, doc_url: &Url) -> Url {
    let Ok(base_sel) = Selector::parse("base[href]") else {
        return doc_url.clone();
    };
    html.select(&base_sel)
        .next()
        .and_then(|base| base.value().attr("href"))
        .and_then(|href| doc_url.join(href.trim()).ok())
        .unwrap_or_else(|| doc_url.clone())
}

fn candidate(
    element: ElementRef<'_>,
    base: &Url,
    source: &SourceDescriptor,
) -> Option<CandidateRecord> {
    let title = display_text(element);
    if title.is_empty() {
        return None;
    }

    let href = element.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let target = base.join(href).ok()?;
    if !matches!(target.scheme(), "http" | "https") {
        return None;
    }

    let target_url = String::from(target);
    if !source.rule.accepts_url(&target_url) {
        return None;
    }

    Some(CandidateRecord {
        title,
        target_url,
        source_label: source.label.clone(),
    })
}

/// Element text with surrounding whitespace trimmed and inner runs collapsed.
fn display_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
