//! Query encoding for the `q` parameter of a source's search endpoint.

use url::form_urlencoded;

/// Encode raw user text for embedding in a URL query component.
///
/// Uses `application/x-www-form-urlencoded` rules: ASCII alphanumerics and
/// `*-._` pass through, spaces become `+`, everything else (including
/// non-ASCII, as UTF-8 bytes) is percent-encoded. Total over all input;
/// the empty string encodes to the empty string.
///
/// # Examples
///
/// ```
/// use litestream_search::query::encode;
///
/// assert_eq!(encode("dune"), "dune");
/// assert_eq!(encode("the matrix"), "the+matrix");
/// assert_eq!(encode("a&b=c"), "a%26b%3Dc");
/// ```
pub fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Returns `true` when the query has no searchable content.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}
