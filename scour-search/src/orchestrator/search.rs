//! Core search orchestrator: sequential fallback chain over providers.
//!
//! Walks the providers in priority order, fetching through the
//! [`Transport`], parsing each body with the provider's parser,
//! normalising text fields and folding new URLs into a per-call
//! [`CollectedSet`] until `max_results` is reached or the chain runs out.

use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::engines::provider_chain;
use crate::error::SearchError;
use crate::http::Transport;
use crate::text::normalize;
use crate::types::{RawCandidate, SearchEnvelope, SearchRecord, AGGREGATION_SOURCE};

use super::dedup::CollectedSet;

/// Drives the fallback chain for search queries.
///
/// Holds only immutable data (transport, provider chain, config). Every
/// [`aggregate`](Self::aggregate) call owns its own collected set and
/// counter, so one aggregator can serve concurrent calls.
pub struct Aggregator<T> {
    transport: T,
    providers: Vec<Box<dyn SearchProvider>>,
    config: SearchConfig,
}

impl<T: Transport> Aggregator<T> {
    /// Aggregator over the providers enabled in `config`.
    pub fn new(transport: T, config: SearchConfig) -> Self {
        let providers = provider_chain(&config);
        Self::with_providers(transport, providers, config)
    }

    /// Aggregator over an explicit provider list, re-ordered by priority.
    /// Providers sharing a priority keep their given order.
    pub fn with_providers(
        transport: T,
        mut providers: Vec<Box<dyn SearchProvider>>,
        config: SearchConfig,
    ) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self {
            transport,
            providers,
            config,
        }
    }

    /// Provider names in the order they will be tried.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Search for `query`, returning at most `max_results` distinct records.
    ///
    /// Never fails: provider errors are logged and the chain advances. When
    /// every provider fails the envelope is a success with no results.
    /// `max_results == 0` returns immediately without fetching anything.
    pub async fn aggregate(&self, query: &str, max_results: usize) -> SearchEnvelope {
        self.aggregate_with_cancel(query, max_results, &CancellationToken::new())
            .await
    }

    /// Like [`aggregate`](Self::aggregate), but stops before the next
    /// provider attempt once `cancel` fires, returning what was collected.
    pub async fn aggregate_with_cancel(
        &self,
        query: &str,
        max_results: usize,
        cancel: &CancellationToken,
    ) -> SearchEnvelope {
        tracing::trace!(query, max_results, "search started");

        let mut collected = CollectedSet::new();
        let mut attempted = 0usize;
        let mut failed = 0usize;

        for provider in &self.providers {
            let remaining = max_results.saturating_sub(collected.len());
            if remaining == 0 {
                break;
            }

            // Reaching a later provider means the previous one failed or underfilled.
            if attempted > 0 {
                self.pause_before_fallback(cancel).await;
            }
            if cancel.is_cancelled() {
                tracing::debug!(collected = collected.len(), "search cancelled between providers");
                break;
            }

            attempted += 1;
            match self.query_provider(provider.as_ref(), query, max_results).await {
                Ok(candidates) => {
                    let added = self.fold(&mut collected, candidates, provider.name(), max_results);
                    tracing::debug!(
                        provider = provider.name(),
                        added,
                        total = collected.len(),
                        "provider returned results"
                    );
                }
                Err(err) => {
                    failed += 1;
                    record_failure(provider.name(), &err);
                }
            }
        }

        if attempted > 0 && failed == attempted {
            tracing::warn!(attempted, "all providers failed; returning empty result set");
        }

        SearchEnvelope::success(query, collected.into_records(), AGGREGATION_SOURCE)
    }

    /// Fetch and parse one provider, bounding the fetch by the configured timeout.
    ///
    /// Parses up to the full `max_results`; duplicates of records collected
    /// from earlier providers are only dropped later, in `fold`.
    async fn query_provider(
        &self,
        provider: &dyn SearchProvider,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawCandidate>, SearchError> {
        let request = provider.build_request(query)?;
        let timeout = self.config.timeout();

        let response = tokio::time::timeout(timeout, self.transport.fetch(&request, timeout))
            .await
            .map_err(|_| SearchError::Fetch(format!("timed out after {}s", timeout.as_secs())))??;

        if !response.is_success() {
            return Err(SearchError::Fetch(format!("HTTP status {}", response.status)));
        }

        provider.parse(&response.body, max_results)
    }

    /// Add new, valid candidates to `collected`; returns how many were added.
    fn fold(
        &self,
        collected: &mut CollectedSet,
        candidates: Vec<RawCandidate>,
        source: &str,
        max_results: usize,
    ) -> usize {
        let mut added = 0;
        for candidate in candidates {
            if collected.len() >= max_results {
                break;
            }
            let url = candidate.url.trim();
            if url.is_empty() || collected.contains(url) || is_javascript_pseudo_url(url) {
                continue;
            }
            let record = build_record(&candidate, url, source, &self.config);
            if collected.insert(record) {
                added += 1;
            }
        }
        added
    }

    /// Sleep a random duration from `request_delay_ms`, waking early on cancel.
    async fn pause_before_fallback(&self, cancel: &CancellationToken) {
        let (min, max) = self.config.request_delay_ms;
        let delay_ms = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        if delay_ms == 0 {
            return;
        }
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {}
        }
    }
}

/// Whether `url` is a `javascript:` pseudo-URL (case-insensitive).
pub fn is_javascript_pseudo_url(url: &str) -> bool {
    url.trim_start()
        .get(..11)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

fn build_record(
    candidate: &RawCandidate,
    url: &str,
    source: &str,
    config: &SearchConfig,
) -> SearchRecord {
    let title = normalize(&candidate.title, config.title_max_chars);
    let snippet = candidate
        .snippet
        .as_deref()
        .map(|s| normalize(s, config.snippet_max_chars))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| normalize(&candidate.title, config.snippet_max_chars));

    SearchRecord {
        title,
        url: url.to_owned(),
        snippet,
        source: source.to_owned(),
    }
}

fn record_failure(provider: &str, err: &SearchError) {
    tracing::warn!(provider, error = %err, "provider failed; advancing fallback chain");
}
