//! Search orchestrator: sequential fallback chain, dedup, capping.
//!
//! Providers are tried one at a time in priority order until enough
//! distinct results are collected or the chain is exhausted. Provider
//! failures advance the chain; they never fail the search.

pub mod dedup;
pub mod search;

pub use search::{is_javascript_pseudo_url, Aggregator};
