//! Shared response parsers for the two provider shapes.
//!
//! Providers describe *what* to extract as data ([`MarkupRules`] or
//! [`StructuredKeys`]); the functions here do the extraction. Malformed
//! input yields fewer candidates, never a panic. Only an undecodable
//! document or an invalid selector produces [`SearchError::Parse`], which
//! the engine treats as "this provider returned nothing".

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::SearchError;
use crate::text::collapse_whitespace;
use crate::types::RawCandidate;

/// Selector rules for an HTML result page.
#[derive(Debug, Clone, Copy)]
pub struct MarkupRules {
    /// One element per organic result.
    pub container: &'static str,
    /// Primary link inside a container; its text is the title, its href the URL.
    pub link: &'static str,
    /// Optional snippet element inside a container.
    pub snippet: &'static str,
    /// Links containing this string point back at the provider and are dropped.
    pub own_domain: &'static str,
}

/// Key names for a JSON results document.
#[derive(Debug, Clone, Copy)]
pub struct StructuredKeys {
    /// Top-level array of result entries.
    pub results: &'static str,
    pub title: &'static str,
    pub url: &'static str,
    pub snippet: &'static str,
}

/// Extract up to `max_results` candidates from an HTML result page.
///
/// `resolve_href` turns a raw `href` into the candidate URL (unwrapping
/// redirects, rejecting relative links); returning `None` drops the
/// container. Containers without a link, with an empty title, or whose
/// resolved URL contains [`MarkupRules::own_domain`] are skipped.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] only if a selector in `rules` is invalid.
pub fn parse_markup<F>(
    html: &str,
    rules: &MarkupRules,
    max_results: usize,
    resolve_href: F,
) -> Result<Vec<RawCandidate>, SearchError>
where
    F: Fn(&str) -> Option<String>,
{
    let container_sel = selector(rules.container)?;
    let link_sel = selector(rules.link)?;
    let snippet_sel = selector(rules.snippet)?;

    let mut candidates = Vec::new();
    if max_results == 0 {
        return Ok(candidates);
    }

    let document = Html::parse_document(html);

    for container in document.select(&container_sel) {
        let Some(link) = container.select(&link_sel).next() else {
            continue;
        };

        let title = element_text(link);
        if title.is_empty() {
            continue;
        }

        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_href(href.trim()) else {
            continue;
        };
        if url.is_empty() || url.contains(rules.own_domain) {
            continue;
        }

        let snippet = container
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .filter(|s| !s.is_empty());

        candidates.push(RawCandidate {
            title,
            url,
            snippet,
        });

        if candidates.len() >= max_results {
            break;
        }
    }

    Ok(candidates)
}

/// Extract up to `max_results` candidates from a JSON results document.
///
/// A document without the results array yields no candidates. Entries
/// lacking both a title and a URL are skipped; missing or non-string
/// fields are treated as absent.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if `body` is not valid JSON.
pub fn parse_structured(
    body: &str,
    keys: &StructuredKeys,
    max_results: usize,
) -> Result<Vec<RawCandidate>, SearchError> {
    let document: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid JSON document: {e}")))?;

    let Some(entries) = document.get(keys.results).and_then(|v| v.as_array()) else {
        return Ok(Vec::new());
    };

    let string_field = |entry: &serde_json::Value, key: &str| {
        entry
            .get(key)
            .and_then(|v| v.as_str())
            .map(collapse_whitespace)
            .unwrap_or_default()
    };

    let candidates = entries
        .iter()
        .filter_map(|entry| {
            let title = string_field(entry, keys.title);
            let url = string_field(entry, keys.url);
            if title.is_empty() && url.is_empty() {
                return None;
            }
            let snippet = Some(string_field(entry, keys.snippet)).filter(|s| !s.is_empty());
            Some(RawCandidate {
                title,
                url,
                snippet,
            })
        })
        .take(max_results)
        .collect();

    Ok(candidates)
}

/// Accept only absolute http(s) links, upgrading protocol-relative ones.
///
/// The original string is returned unchanged (no canonicalisation).
pub fn absolute_http_url(href: &str) -> Option<String> {
    let full = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_owned()
    };
    let parsed = Url::parse(&full).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(full)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: MarkupRules = MarkupRules {
        container: "div.hit",
        link: "a.hit-link",
        snippet: "p.hit-text",
        own_domain: "engine.test",
    };

    const KEYS: StructuredKeys = StructuredKeys {
        results: "results",
        title: "title",
        url: "url",
        snippet: "content",
    };

    const HTML: &str = r#"<html><body>
<div class="hit">
    <a class="hit-link" href="https://one.example/">
        First
        result
    </a>
    <p class="hit-text">  The first   snippet. </p>
</div>
<div class="hit">
    <a class="hit-link" href="https://two.example/">Second result</a>
</div>
<div class="hit">
    <a class="hit-link" href="https://engine.test/settings">Engine settings</a>
</div>
<div class="hit">
    <span>No link here</span>
</div>
<div class="hit">
    <a class="hit-link" href="/relative/path">Relative</a>
</div>
<div class="hit">
    <a class="hit-link" href="https://three.example/"></a>
</div>
<div class="hit">
    <a class="hit-link" href="https://four.example/">Fourth</a>
    <p class="hit-text"></p>
</div>
</body></html>"#;

    #[test]
    fn markup_extracts_title_url_and_snippet() {
        let candidates = parse_markup(HTML, &RULES, 10, absolute_http_url).expect("parse");
        assert_eq!(candidates.len(), 3);

        assert_eq!(candidates[0].title, "First result");
        assert_eq!(candidates[0].url, "https://one.example/");
        assert_eq!(candidates[0].snippet.as_deref(), Some("The first snippet."));
    }

    #[test]
    fn markup_missing_or_empty_snippet_is_none() {
        let candidates = parse_markup(HTML, &RULES, 10, absolute_http_url).expect("parse");
        assert_eq!(candidates[1].url, "https://two.example/");
        assert!(candidates[1].snippet.is_none());
        assert_eq!(candidates[2].url, "https://four.example/");
        assert!(candidates[2].snippet.is_none());
    }

    #[test]
    fn markup_drops_self_links_relative_links_and_empty_titles() {
        let candidates = parse_markup(HTML, &RULES, 10, absolute_http_url).expect("parse");
        for c in &candidates {
            assert!(!c.url.contains("engine.test"), "self link kept: {}", c.url);
            assert!(c.url.starts_with("https://"));
            assert!(!c.title.is_empty());
        }
    }

    #[test]
    fn markup_respects_max_results() {
        let candidates = parse_markup(HTML, &RULES, 2, absolute_http_url).expect("parse");
        assert_eq!(candidates.len(), 2);
        let candidates = parse_markup(HTML, &RULES, 0, absolute_http_url).expect("parse");
        assert!(candidates.is_empty());
    }

    #[test]
    fn markup_without_containers_is_empty_not_error() {
        let candidates =
            parse_markup("<html><body><p>captcha</p></body></html>", &RULES, 10, absolute_http_url)
                .expect("parse");
        assert!(candidates.is_empty());
        let candidates = parse_markup("", &RULES, 10, absolute_http_url).expect("parse");
        assert!(candidates.is_empty());
    }

    #[test]
    fn markup_invalid_selector_is_parse_error() {
        let rules = MarkupRules {
            container: "div[",
            ..RULES
        };
        let err = parse_markup(HTML, &rules, 10, absolute_http_url).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn structured_maps_entries() {
        let body = r#"{"results": [
            {"title": "Rust Book", "url": "https://doc.rust-lang.org/book/", "content": "Learn\n Rust"},
            {"title": "No content", "url": "https://nc.example/"}
        ]}"#;
        let candidates = parse_structured(body, &KEYS, 10).expect("parse");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Rust Book");
        assert_eq!(candidates[0].snippet.as_deref(), Some("Learn Rust"));
        assert!(candidates[1].snippet.is_none());
    }

    #[test]
    fn structured_skips_entries_lacking_title_and_url() {
        let body = r#"{"results": [
            {"content": "orphan snippet"},
            {"title": "", "url": ""},
            {"title": 42, "url": null},
            {"url": "https://untitled.example/"},
            {"title": "Link-less"}
        ]}"#;
        let candidates = parse_structured(body, &KEYS, 10).expect("parse");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "https://untitled.example/");
        assert!(candidates[0].title.is_empty());
        assert_eq!(candidates[1].title, "Link-less");
        assert!(candidates[1].url.is_empty());
    }

    #[test]
    fn structured_respects_max_results() {
        let body = r#"{"results": [
            {"title": "a", "url": "https://a.example/"},
            {"title": "b", "url": "https://b.example/"},
            {"title": "c", "url": "https://c.example/"}
        ]}"#;
        assert_eq!(parse_structured(body, &KEYS, 2).expect("parse").len(), 2);
    }

    #[test]
    fn structured_without_results_key_is_empty() {
        let candidates = parse_structured(r#"{"answers": []}"#, &KEYS, 10).expect("parse");
        assert!(candidates.is_empty());
        let candidates = parse_structured(r#"{"results": "nope"}"#, &KEYS, 10).expect("parse");
        assert!(candidates.is_empty());
    }

    #[test]
    fn structured_invalid_json_is_parse_error() {
        let err = parse_structured("<html>rate limited</html>", &KEYS, 10).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn absolute_http_url_rules() {
        assert_eq!(
            absolute_http_url("https://a.example/x?y=1"),
            Some("https://a.example/x?y=1".into())
        );
        assert_eq!(
            absolute_http_url("//a.example/x"),
            Some("https://a.example/x".into())
        );
        assert!(absolute_http_url("/relative").is_none());
        assert!(absolute_http_url("javascript:void(0)").is_none());
        assert!(absolute_http_url("mailto:someone@example.com").is_none());
    }
}
