//! Merging per-source candidates into one result set.
//!
//! Streams are concatenated in the order supplied, deduplicated by
//! display title with the first occurrence kept, then capped.

use std::collections::HashSet;

use crate::types::{CandidateRecord, ResultSet};

/// Merge per-source candidate lists into a [`ResultSet`].
///
/// A record whose title equals an earlier record's title is dropped,
/// even if it came from a different source or points elsewhere. The
/// result holds at most `max_results` records.
pub fn aggregate<I>(streams: I, max_results: usize) -> ResultSet
where
    I: IntoIterator<Item = Vec<CandidateRecord>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for record in streams.into_iter().flatten() {
        if records.len() >= max_results {
            break;
        }
        if seen.insert(record.title.clone()) {
            records.push(record);
        }
    }

    ResultSet::from_records(records)
}
