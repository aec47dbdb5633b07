//! # scour-search
//!
//! Fallback-chain web search aggregation.
//!
//! Queries search providers one at a time in priority order (DuckDuckGo's
//! HTML page, then Startpage, then a SearX JSON API), parses each
//! response into common records, deduplicates by exact URL, and stops as
//! soon as the requested number of results is collected.
//!
//! ## Design
//!
//! - Providers are data: request construction plus a parser, selected by
//!   a declared [`ResponseKind`] (markup or structured)
//! - Strictly sequential: later providers only fill a shortfall, never
//!   replace earlier results
//! - Graceful degradation: unreachable providers and garbage responses
//!   advance the chain; "no results" is a valid answer, not an error
//! - Transport is a trait, so the engine is testable without a network
//!
//! ## Security
//!
//! - No API keys or secrets
//! - Search queries are logged only at trace level
//! - Titles and snippets are stripped to a safe character set

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod parser;
pub mod text;
pub mod types;

pub use config::SearchConfig;
pub use engine::SearchProvider;
pub use error::{Result, SearchError};
pub use http::{FetchResponse, HttpTransport, ProviderRequest, Transport};
pub use orchestrator::Aggregator;
pub use types::{Provider, RawCandidate, ResponseKind, SearchEnvelope, SearchRecord};

/// Search the web through the configured fallback chain over HTTP.
///
/// Returns at most `max_results` distinct records. Provider failures are
/// logged and never surface here; an empty result set is a success.
///
/// # Errors
///
/// Returns [`SearchError::Contract`] if `max_results` is negative and
/// [`SearchError::Config`] if `config` is invalid or the HTTP client
/// cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scour_search::Result<()> {
/// let config = scour_search::SearchConfig::default();
/// let envelope = scour_search::search("rust ownership", 3, &config).await?;
/// for record in envelope.results() {
///     println!("{}: {}", record.title, record.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, max_results: i64, config: &SearchConfig) -> Result<SearchEnvelope> {
    let max_results = usize::try_from(max_results).map_err(|_| {
        SearchError::Contract(format!("max_results must not be negative, got {max_results}"))
    })?;
    config.validate()?;

    let transport = HttpTransport::new(config)?;
    let aggregator = Aggregator::new(transport, config.clone());
    Ok(aggregator.aggregate(query, max_results).await)
}

/// Search the web with sensible default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str, max_results: i64) -> Result<SearchEnvelope> {
    search(query, max_results, &SearchConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_rejects_negative_max_results() {
        let err = search("test", -1, &SearchConfig::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::Contract(_)));
        assert!(err.to_string().contains("max_results"));
    }

    #[tokio::test]
    async fn search_validates_config_empty_providers() {
        let config = SearchConfig {
            providers: vec![],
            ..Default::default()
        };
        let err = search("test", 5, &config).await.unwrap_err();
        assert!(err.to_string().contains("provider"));
    }

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = search("test", 5, &config).await.unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_zero_results_is_empty_success_without_network() {
        let envelope = search("test", 0, &SearchConfig::default())
            .await
            .expect("zero results is valid");
        assert_eq!(envelope.total(), 0);
        assert!(!envelope.is_error());
    }

    #[tokio::test]
    #[ignore] // Live test: run with `cargo test -- --ignored`
    async fn live_search_default() {
        let envelope = search_default("rust programming", 5)
            .await
            .expect("live search should work");
        assert!(envelope.total() <= 5);
        for r in envelope.results() {
            assert!(!r.url.is_empty());
        }
    }
}
