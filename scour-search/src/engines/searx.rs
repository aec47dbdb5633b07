//! SearX provider: JSON API of a public SearX instance.

use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http::ProviderRequest;
use crate::parser::{self, StructuredKeys};
use crate::types::{Provider, RawCandidate};
use url::Url;

const KEYS: StructuredKeys = StructuredKeys {
    results: "results",
    title: "title",
    url: "url",
    snippet: "content",
};

/// SearX JSON search adapter.
///
/// Priority 3 provider, the last resort. Instances vary in availability;
/// a body that is not JSON (HTML error pages, rate-limit notices) yields
/// [`SearchError::Parse`], which the aggregator counts as a provider
/// failure before advancing the chain.
#[derive(Debug, Clone)]
pub struct SearXProvider {
    base_url: String,
}

impl SearXProvider {
    /// Adapter for the instance at `base_url`, e.g. `https://searx.be`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl SearchProvider for SearXProvider {
    fn provider(&self) -> Provider {
        Provider::SearX
    }

    fn build_request(&self, query: &str) -> Result<ProviderRequest, SearchError> {
        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        let url = Url::parse_with_params(&endpoint, &[("q", query), ("format", "json")])
            .map_err(|e| SearchError::Config(format!("invalid SearX base URL: {e}")))?;

        Ok(ProviderRequest::new(url.as_str()).with_header("Accept", "application/json"))
    }

    fn parse(&self, body: &str, max_results: usize) -> Result<Vec<RawCandidate>, SearchError> {
        let candidates = parser::parse_structured(body, &KEYS, max_results)?;
        tracing::debug!(count = candidates.len(), "SearX results parsed");
        Ok(candidates)
    }
}
