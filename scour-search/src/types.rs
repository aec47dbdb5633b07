//! Core types: provider identity, raw candidates, records and the response envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy label carried by every envelope the aggregation engine produces.
pub const AGGREGATION_SOURCE: &str = "fallback-chain";

/// Search providers that scour-search knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// DuckDuckGo HTML endpoint. Scraper-friendly, tried first.
    DuckDuckGo,
    /// Startpage: proxied Google results, first fallback.
    Startpage,
    /// Public SearX instance JSON API. Last resort.
    SearX,
}

/// Declared response shape of a provider, selecting which parser family applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// HTML result page queried with CSS selectors.
    Markup,
    /// JSON document with a results collection.
    Structured,
}

impl Provider {
    /// Returns the human-readable name of this provider, used as the record `source`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Startpage => "Startpage",
            Self::SearX => "SearX",
        }
    }

    /// Position in the fallback chain. Lower is tried first.
    pub fn priority(&self) -> u8 {
        match self {
            Self::DuckDuckGo => 1,
            Self::Startpage => 2,
            Self::SearX => 3,
        }
    }

    /// Response shape this provider returns.
    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::DuckDuckGo | Self::Startpage => ResponseKind::Markup,
            Self::SearX => ResponseKind::Structured,
        }
    }

    /// Returns all providers in priority order.
    pub fn all() -> &'static [Provider] {
        &[Self::DuckDuckGo, Self::Startpage, Self::SearX]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unvalidated `(title, url, snippet)` triple extracted by a parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCandidate {
    pub title: String,
    pub url: String,
    /// `None` when the provider supplied no snippet for this entry.
    pub snippet: Option<String>,
}

/// A single discovered search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Normalised, length-capped page title.
    pub title: String,
    /// Absolute URL; the deduplication key.
    pub url: String,
    /// Normalised, length-capped snippet (the title when none was supplied).
    pub snippet: String,
    /// Name of the provider that produced this record.
    pub source: String,
}

/// The response returned for one search invocation.
///
/// Built once through [`SearchEnvelope::success`] or
/// [`SearchEnvelope::failure`] and immutable afterwards. An empty
/// `results` list on a success envelope is a valid answer, not an error.
///
/// Serialize-only; `total` always equals `results.len()` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEnvelope {
    query: String,
    results: Vec<SearchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SearchEnvelope {
    /// A successful envelope; `total` is always `results.len()`.
    pub fn success(
        query: impl Into<String>,
        results: Vec<SearchRecord>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            total: Some(results.len()),
            results,
            source: Some(source.into()),
            error: None,
        }
    }

    /// A fatal-failure envelope: no results, no total, only the error text.
    pub fn failure(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            total: None,
            source: None,
            error: Some(error.into()),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchRecord] {
        &self.results
    }

    /// Number of results; zero for failure envelopes.
    pub fn total(&self) -> usize {
        self.total.unwrap_or(0)
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether this envelope reports a fatal failure.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> SearchRecord {
        SearchRecord {
            title: "Example".into(),
            url: url.into(),
            snippet: "An example page".into(),
            source: "DuckDuckGo".into(),
        }
    }

    #[test]
    fn provider_display() {
        assert_eq!(Provider::DuckDuckGo.to_string(), "DuckDuckGo");
        assert_eq!(Provider::Startpage.to_string(), "Startpage");
        assert_eq!(Provider::SearX.to_string(), "SearX");
    }

    #[test]
    fn provider_priorities_are_strictly_ascending_in_all() {
        let all = Provider::all();
        assert_eq!(all.len(), 3);
        for pair in all.windows(2) {
            assert!(pair[0].priority() < pair[1].priority());
        }
    }

    #[test]
    fn provider_kinds() {
        assert_eq!(Provider::DuckDuckGo.kind(), ResponseKind::Markup);
        assert_eq!(Provider::Startpage.kind(), ResponseKind::Markup);
        assert_eq!(Provider::SearX.kind(), ResponseKind::Structured);
    }

    #[test]
    fn provider_deserializes_from_name() {
        let provider: Provider = serde_json::from_str("\"SearX\"").expect("deserialize");
        assert_eq!(provider, Provider::SearX);
    }

    #[test]
    fn success_envelope_total_matches_results() {
        let envelope = SearchEnvelope::success(
            "rust",
            vec![record("https://a.com"), record("https://b.com")],
            AGGREGATION_SOURCE,
        );
        assert_eq!(envelope.total(), 2);
        assert_eq!(envelope.source(), Some("fallback-chain"));
        assert!(!envelope.is_error());
    }

    #[test]
    fn success_envelope_serializes_without_error_field() {
        let envelope = SearchEnvelope::success("rust", vec![], AGGREGATION_SOURCE);
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["query"], "rust");
        assert_eq!(json["total"], 0);
        assert_eq!(json["source"], "fallback-chain");
        assert!(json["results"].as_array().expect("array").is_empty());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_envelope_serializes_error_and_empty_results() {
        let envelope = SearchEnvelope::failure("", "No search query provided");
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["error"], "No search query provided");
        assert!(json["results"].as_array().expect("array").is_empty());
        assert!(json.get("total").is_none());
        assert!(json.get("source").is_none());
        assert!(envelope.is_error());
        assert_eq!(envelope.total(), 0);
    }

    #[test]
    fn results_keep_insertion_order_through_serialization() {
        let envelope = SearchEnvelope::success(
            "q",
            vec![record("https://z.com"), record("https://a.com")],
            AGGREGATION_SOURCE,
        );
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["results"][0]["url"], "https://z.com");
        assert_eq!(json["results"][1]["url"], "https://a.com");
        assert_eq!(json["total"], 2);
    }
}
