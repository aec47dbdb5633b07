//! Transport seam and the default HTTP implementation.
//!
//! The aggregation engine only ever talks to a [`Transport`]; it never
//! touches sockets itself. [`HttpTransport`] is the production
//! implementation: a [`reqwest::Client`] with browser-like headers and a
//! rotating User-Agent.

use std::future::Future;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Realistic browser User-Agent strings, one picked per transport.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// A fully built provider request: absolute URL plus extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl ProviderRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Append a header, builder style.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches a URL and returns its status and body.
///
/// Implementations must report network errors and timeouts as
/// [`SearchError::Fetch`]. Returning a non-2xx [`FetchResponse`] is
/// allowed; the engine treats it as a fetch failure.
///
/// All implementations must be `Send + Sync` so one transport can serve
/// concurrent aggregations.
pub trait Transport: Send + Sync {
    fn fetch(
        &self,
        request: &ProviderRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<FetchResponse, SearchError>> + Send;
}

/// [`Transport`] over a shared [`reqwest::Client`].
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the HTTP client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

impl Transport for HttpTransport {
    async fn fetch(
        &self,
        request: &ProviderRequest,
        timeout: Duration,
    ) -> Result<FetchResponse, SearchError> {
        let mut builder = self.client.get(&request.url).timeout(timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Errors are stripped of their URL so queries never reach warn-level logs.
        let response = builder
            .send()
            .await
            .map_err(|e| SearchError::Fetch(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Fetch(format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Fetch(format!("response read failed: {}", e.without_url())))?;

        tracing::trace!(bytes = body.len(), "response received");

        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Build a [`reqwest::Client`] configured for search engine scraping.
///
/// The client has:
/// - Cookie store enabled (for consent interstitials)
/// - Timeout from config (requests may tighten it further)
/// - Random User-Agent from built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.timeout())
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array; choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
