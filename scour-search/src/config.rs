//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which providers form the fallback chain,
//! fetch timeouts, the inter-provider delay and text caps. The defaults
//! are tuned for polite, sequential scraping.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SearchError;
use crate::text::{DEFAULT_SNIPPET_MAX_CHARS, DEFAULT_TITLE_MAX_CHARS};
use crate::types::Provider;

/// Configuration for a search aggregation.
///
/// Use [`Default::default()`] for sensible defaults, construct with
/// field overrides, or load from TOML where missing keys keep their
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Providers enabled for the fallback chain. The chain is always ordered
    /// by [`Provider::priority`], regardless of the order listed here.
    pub providers: Vec<Provider>,
    /// Per-fetch timeout in seconds.
    pub timeout_seconds: u64,
    /// Random delay range in milliseconds `(min, max)` slept before falling
    /// back to the next provider.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Base URL of the SearX instance queried for JSON results.
    pub searx_base_url: String,
    /// Maximum characters kept from a result title.
    pub title_max_chars: usize,
    /// Maximum characters kept from a result snippet.
    pub snippet_max_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: Provider::all().to_vec(),
            timeout_seconds: 10,
            request_delay_ms: (500, 1000),
            user_agent: None,
            searx_base_url: "https://searx.be".into(),
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            snippet_max_chars: DEFAULT_SNIPPET_MAX_CHARS,
        }
    }
}

impl SearchConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the text is not valid TOML for
    /// this structure.
    pub fn from_toml_str(text: &str) -> Result<Self, SearchError> {
        toml::from_str(text).map_err(|e| SearchError::Config(format!("invalid TOML: {e}")))
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Per-fetch timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `providers` must not be empty
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    /// - `title_max_chars` and `snippet_max_chars` must be greater than 0
    /// - `searx_base_url` must be an absolute http(s) URL when SearX is enabled
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.providers.is_empty() {
            return Err(SearchError::Config(
                "at least one provider must be enabled".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        if self.title_max_chars == 0 || self.snippet_max_chars == 0 {
            return Err(SearchError::Config(
                "title_max_chars and snippet_max_chars must be greater than 0".into(),
            ));
        }
        if self.providers.contains(&Provider::SearX) {
            match url::Url::parse(&self.searx_base_url) {
                Ok(u) if matches!(u.scheme(), "http" | "https") => {}
                _ => {
                    return Err(SearchError::Config(format!(
                        "searx_base_url is not an http(s) URL: {}",
                        self.searx_base_url
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.request_delay_ms, (500, 1000));
        assert!(config.user_agent.is_none());
        assert_eq!(config.searx_base_url, "https://searx.be");
        assert_eq!(config.title_max_chars, 100);
        assert_eq!(config.snippet_max_chars, 200);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn default_providers_include_all_three() {
        let config = SearchConfig::default();
        assert_eq!(
            config.providers,
            vec![Provider::DuckDuckGo, Provider::Startpage, Provider::SearX]
        );
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn empty_providers_rejected() {
        let config = SearchConfig {
            providers: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn invalid_delay_range_rejected() {
        let config = SearchConfig {
            request_delay_ms: (1000, 500),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn zero_text_caps_rejected() {
        let config = SearchConfig {
            snippet_max_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_searx_url_rejected_only_when_enabled() {
        let config = SearchConfig {
            searx_base_url: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("searx_base_url"));

        let config = SearchConfig {
            providers: vec![Provider::DuckDuckGo],
            searx_base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_delay_range_valid() {
        let config = SearchConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config = SearchConfig::from_toml_str(
            r#"
providers = ["SearX", "DuckDuckGo"]
timeout_seconds = 15
searx_base_url = "https://searx.example.org"
"#,
        )
        .expect("parse");
        assert_eq!(config.providers, vec![Provider::SearX, Provider::DuckDuckGo]);
        assert_eq!(config.timeout_seconds, 15);
        assert_eq!(config.searx_base_url, "https://searx.example.org");
        assert_eq!(config.request_delay_ms, (500, 1000));
        assert_eq!(config.title_max_chars, 100);
    }

    #[test]
    fn toml_unknown_provider_rejected() {
        let err = SearchConfig::from_toml_str(r#"providers = ["AltaVista"]"#).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "request_delay_ms = [0, 250]").expect("write");
        let config = SearchConfig::from_file(file.path()).expect("load");
        assert_eq!(config.request_delay_ms, (0, 250));
    }

    #[test]
    fn from_file_missing_path_is_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = SearchConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
