//! Error types for the scour-search crate.
//!
//! Provider-level errors (`Fetch`, `Parse`) never reach the caller of
//! [`crate::Aggregator::aggregate`]; the engine turns them into
//! "try the next provider" signals. `Config` and `Contract` are only
//! surfaced by the checked entry points in the crate root.

/// Errors that can occur while querying search providers.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport-level failure: network error, timeout, or non-success status.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A provider response body could not be decoded or queried.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The caller violated the aggregation contract (e.g. negative result count).
    #[error("contract violation: {0}")]
    Contract(String),
}

/// Convenience type alias for scour-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
