//! DuckDuckGo search provider: most scraper-friendly, tried first.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http::ProviderRequest;
use crate::parser::{self, MarkupRules};
use crate::types::{Provider, RawCandidate};
use url::Url;

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const RULES: MarkupRules = MarkupRules {
    container: "div.result:not(.result--ad)",
    link: "a.result__a",
    snippet: ".result__snippet",
    own_domain: "duckduckgo.com",
};

/// DuckDuckGo HTML search adapter.
///
/// Priority 1 provider. Issues a GET against the HTML endpoint with
/// browser-like headers.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    endpoint: String,
}

impl DuckDuckGoProvider {
    pub fn new() -> Self {
        Self::with_endpoint(ENDPOINT)
    }

    /// Point the adapter at a different HTML endpoint (mirrors, tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it. Other
    /// absolute links pass through unchanged; relative links are dropped.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = parser::absolute_http_url(href)?;
        let parsed = Url::parse(&full_href).ok()?;

        let ddg_host = parsed
            .host_str()
            .is_some_and(|host| host == "duckduckgo.com" || host.ends_with(".duckduckgo.com"));
        if ddg_host && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl Default for DuckDuckGoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProvider for DuckDuckGoProvider {
    fn provider(&self) -> Provider {
        Provider::DuckDuckGo
    }

    fn build_request(&self, query: &str) -> Result<ProviderRequest, SearchError> {
        let url = Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map_err(|e| SearchError::Config(format!("invalid DuckDuckGo endpoint: {e}")))?;

        Ok(ProviderRequest::new(url.as_str())
            .with_header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .with_header("Accept-Language", "en-US,en;q=0.5")
            .with_header("DNT", "1")
            .with_header("Upgrade-Insecure-Requests", "1"))
    }

    fn parse(&self, body: &str, max_results: usize) -> Result<Vec<RawCandidate>, SearchError> {
        let candidates = parser::parse_markup(body, &RULES, max_results, Self::extract_url)?;
        tracing::debug!(count = candidates.len(), "DuckDuckGo results parsed");
        Ok(candidates)
    }
}
