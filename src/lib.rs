//! Command-line front end for `scour-search`.
//!
//! Argument handling, the presentation fallback record and JSON rendering
//! live here so the binary stays a thin shell around them.

pub mod cli;
