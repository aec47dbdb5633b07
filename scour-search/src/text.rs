//! Text normalisation for extracted titles and snippets.
//!
//! Scraped text arrives with layout whitespace, entities decoded into odd
//! symbols, and occasionally control characters. Everything outside a small
//! allow-list is replaced so records serialise cleanly.

/// Punctuation kept verbatim; every other non-alphanumeric character becomes a space.
const ALLOWED_PUNCTUATION: &[char] = &['-', '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '"'];

/// Default cap for record titles, in characters.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 100;

/// Default cap for record snippets, in characters.
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 200;

/// Clean raw extracted text and cap it at `max_chars` characters.
///
/// 1. Replace each character outside {letters, digits, `- . , ! ? ; : ( ) [ ] "`, space}
///    with a single space.
/// 2. Collapse whitespace runs to one space and trim both ends.
/// 3. Hard-cut to `max_chars` characters (no ellipsis), dropping any
///    trailing space the cut exposes.
///
/// Idempotent: `normalize(&normalize(s, n), n) == normalize(s, n)`.
///
/// # Examples
///
/// ```
/// use scour_search::text::normalize;
///
/// assert_eq!(normalize("  Rust\n\t<Book>  ", 100), "Rust Book");
/// assert_eq!(normalize("ownership rules", 9), "ownership");
/// ```
pub fn normalize(raw: &str, max_chars: usize) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect();
    let collapsed = collapse_whitespace(&cleaned);
    truncate_chars(&collapsed, max_chars).trim_end().to_owned()
}

/// Collapse any run of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_allowed(c: char) -> bool {
    c == ' ' || c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Slice `text` to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
