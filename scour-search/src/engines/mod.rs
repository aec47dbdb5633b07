//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchProvider`]
//! for one search surface. [`provider_chain`] turns a [`SearchConfig`] into
//! the priority-ordered fallback chain.

pub mod duckduckgo;
pub mod searx;
pub mod startpage;

pub use duckduckgo::DuckDuckGoProvider;
pub use searx::SearXProvider;
pub use startpage::StartpageProvider;

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::types::Provider;

/// Build the adapter for a single [`Provider`] variant.
pub fn build_provider(provider: Provider, config: &SearchConfig) -> Box<dyn SearchProvider> {
    match provider {
        Provider::DuckDuckGo => Box::new(DuckDuckGoProvider::new()),
        Provider::Startpage => Box::new(StartpageProvider::new()),
        Provider::SearX => Box::new(SearXProvider::new(config.searx_base_url.clone())),
    }
}

/// Build the fallback chain for every enabled provider, ordered by
/// ascending priority. Providers listed more than once appear once.
pub fn provider_chain(config: &SearchConfig) -> Vec<Box<dyn SearchProvider>> {
    let mut enabled = config.providers.clone();
    enabled.sort_by_key(Provider::priority);
    enabled.dedup();

    enabled
        .into_iter()
        .map(|provider| build_provider(provider, config))
        .collect()
}
