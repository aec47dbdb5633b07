//! Argument parsing and output for the `scour` binary.
//!
//! Both flag and positional forms are accepted:
//!
//! ```text
//! scour --query "rust ownership" --num-results 3
//! scour "rust ownership" 3
//! ```
//!
//! Flags take precedence over positionals. The binary always prints one
//! JSON envelope on stdout, including on failure.

use clap::{Parser, ValueEnum};
use scour_search::{SearchConfig, SearchEnvelope, SearchError, SearchRecord};

/// Number of results returned when none is requested.
pub const DEFAULT_NUM_RESULTS: i64 = 5;

/// Source label of the placeholder record emitted when nothing was found.
pub const FALLBACK_SOURCE: &str = "Fallback";

#[derive(Parser, Debug)]
#[command(name = "scour", version, about = "Search the web through a fallback chain of providers")]
pub struct Cli {
    /// Search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Number of results to return
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub num_results: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output_format: OutputFormat,

    /// Search query (positional form)
    #[arg(value_name = "QUERY")]
    pub positional_query: Option<String>,

    /// Number of results (positional form)
    #[arg(value_name = "NUM_RESULTS", allow_negative_numbers = true)]
    pub positional_num_results: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    Compact,
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub query: String,
    pub num_results: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("No search query provided")]
    MissingQuery,

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl Cli {
    /// Merge flag and positional forms. Flags win.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingQuery`] if neither form supplies a query.
    /// An empty query string is accepted.
    pub fn resolve(&self) -> Result<Invocation, CliError> {
        let query = self
            .query
            .clone()
            .or_else(|| self.positional_query.clone())
            .ok_or(CliError::MissingQuery)?;
        let num_results = self
            .num_results
            .or(self.positional_num_results)
            .unwrap_or(DEFAULT_NUM_RESULTS);
        Ok(Invocation { query, num_results })
    }
}

/// Resolve arguments, run the search and produce the envelope to print.
///
/// Never fails: every error becomes an error envelope.
pub async fn run(cli: &Cli, config: &SearchConfig) -> SearchEnvelope {
    let invocation = match cli.resolve() {
        Ok(invocation) => invocation,
        Err(e) => return SearchEnvelope::failure("", e.to_string()),
    };

    tracing::debug!(num_results = invocation.num_results, "running search");
    match scour_search::search(&invocation.query, invocation.num_results, config).await {
        Ok(envelope) => with_fallback_record(envelope, invocation.num_results),
        Err(e) => {
            let e = CliError::from(e);
            tracing::warn!(error = %e, "search failed");
            SearchEnvelope::failure(invocation.query, e.to_string())
        }
    }
}

/// Placeholder record pointing at a DuckDuckGo search for `query`.
pub fn fallback_record(query: &str) -> SearchRecord {
    SearchRecord {
        title: format!("Search for: {query}"),
        url: format!("https://duckduckgo.com/?q={}", urlencoding::encode(query)),
        snippet: format!("No results could be retrieved. Try searching for '{query}' directly."),
        source: FALLBACK_SOURCE.to_string(),
    }
}

/// Substitute a single [`fallback_record`] into an empty success envelope
/// when results were requested. Error envelopes and non-empty results pass
/// through untouched.
pub fn with_fallback_record(envelope: SearchEnvelope, requested: i64) -> SearchEnvelope {
    if envelope.is_error() || envelope.total() > 0 || requested <= 0 {
        return envelope;
    }
    let source = envelope
        .source()
        .unwrap_or(scour_search::types::AGGREGATION_SOURCE)
        .to_string();
    let record = fallback_record(envelope.query());
    SearchEnvelope::success(envelope.query(), vec![record], source)
}

/// Serialize an envelope in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(envelope: &SearchEnvelope, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(envelope),
        OutputFormat::Compact => serde_json::to_string(envelope),
    }
}
