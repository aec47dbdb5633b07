//! Trait definition for pluggable search providers.
//!
//! Each provider (DuckDuckGo, Startpage, SearX) implements
//! [`SearchProvider`]: it knows how to build its request and how to parse
//! its response, and nothing else. Fetching is the transport's job and
//! merging is the aggregator's, so adding a provider never touches either.

use crate::error::SearchError;
use crate::http::ProviderRequest;
use crate::types::{Provider, RawCandidate, ResponseKind};

/// A search provider adapter in the fallback chain.
///
/// Adapters are immutable data: they hold no per-call state and can be
/// shared across concurrent aggregations, hence the `Send + Sync` bound.
pub trait SearchProvider: Send + Sync {
    /// Which [`Provider`] variant this adapter represents.
    fn provider(&self) -> Provider;

    /// Build the request for `query`, encoding it as the provider expects.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the provider's endpoint cannot
    /// form a valid URL.
    fn build_request(&self, query: &str) -> Result<ProviderRequest, SearchError>;

    /// Parse a response body into at most `max_results` raw candidates.
    ///
    /// Never deduplicates across providers; that is the aggregator's job.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] only when the body cannot be decoded
    /// at all. A page without results is `Ok(vec![])`.
    fn parse(&self, body: &str, max_results: usize) -> Result<Vec<RawCandidate>, SearchError>;

    /// Name reported as the `source` of records from this provider.
    fn name(&self) -> &'static str {
        self.provider().name()
    }

    /// Position in the fallback chain; lower is tried first.
    fn priority(&self) -> u8 {
        self.provider().priority()
    }

    /// Declared response shape.
    fn kind(&self) -> ResponseKind {
        self.provider().kind()
    }
}
