//! Search orchestrator: concurrent fan-out, title dedup, capping, session state.
//!
//! This module fans out a query to every registered source concurrently,
//! merges the per-source candidates in registry order, deduplicates them
//! by title and truncates to the configured maximum.

pub mod aggregate;
pub mod search;
pub mod session;
