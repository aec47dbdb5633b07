//! Startpage search provider: privacy-focused proxy for Google results.
//!
//! Serves Google results without tracking through a GET to
//! `https://www.startpage.com/sp/search`, which returns plain HTML.

use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http::ProviderRequest;
use crate::parser::{self, MarkupRules};
use crate::types::{Provider, RawCandidate};
use url::Url;

const ENDPOINT: &str = "https://www.startpage.com/sp/search";

// The title link is usually an <a> nested in the title element, but some
// layouts render the title element itself as the anchor.
const RULES: MarkupRules = MarkupRules {
    container: "div.w-gl__result",
    link: ".w-gl__result-title a, a.w-gl__result-title",
    snippet: ".w-gl__description",
    own_domain: "startpage.com",
};

/// Startpage HTML search adapter.
///
/// Priority 2 provider: the first fallback when DuckDuckGo fails or
/// underfills.
#[derive(Debug, Clone)]
pub struct StartpageProvider {
    endpoint: String,
}

impl StartpageProvider {
    pub fn new() -> Self {
        Self::with_endpoint(ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for StartpageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProvider for StartpageProvider {
    fn provider(&self) -> Provider {
        Provider::Startpage
    }

    fn build_request(&self, query: &str) -> Result<ProviderRequest, SearchError> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[("query", query), ("cat", "web"), ("pl", "opensearch")],
        )
        .map_err(|e| SearchError::Config(format!("invalid Startpage endpoint: {e}")))?;

        Ok(ProviderRequest::new(url.as_str())
            .with_header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .with_header("Accept-Language", "en-US,en;q=0.5"))
    }

    fn parse(&self, body: &str, max_results: usize) -> Result<Vec<RawCandidate>, SearchError> {
        let candidates =
            parser::parse_markup(body, &RULES, max_results, parser::absolute_http_url)?;
        tracing::debug!(count = candidates.len(), "Startpage results parsed");
        Ok(candidates)
    }
}
