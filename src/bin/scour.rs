//! `scour` binary: print one JSON search envelope on stdout.
//!
//! Logs go to stderr so stdout stays machine-readable. Set `RUST_LOG`
//! to raise verbosity (default: `warn`).

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use scour::cli::{self, Cli, OutputFormat};
use scour_search::{SearchConfig, SearchEnvelope};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let message = e.kind().as_str().unwrap_or("invalid arguments");
            let envelope = SearchEnvelope::failure("", format!("invalid arguments: {message}"));
            println!("{}", cli::render(&envelope, OutputFormat::Json)?);
            return Ok(ExitCode::FAILURE);
        }
    };

    let envelope = cli::run(&args, &SearchConfig::default()).await;
    println!("{}", cli::render(&envelope, args.output_format)?);

    Ok(if envelope.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
