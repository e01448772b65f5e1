//! Error taxonomy for the search pipeline.
//!
//! Per-source failures ([`SourceError`]) never escape the orchestrator;
//! they are logged and converted into a zero contribution for that source.
//! Only request validation and engine acquisition surface to the caller.

use std::time::Duration;
use thiserror::Error;

/// A request-fatal failure of an aggregated search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was missing or empty. No engine work is attempted.
    #[error("query must not be empty")]
    InvalidQuery,

    /// The rendering engine could not be launched at all.
    #[error("rendering engine unavailable: {0}")]
    Engine(anyhow::Error),
}

/// A failure scoped to a single source within one request.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source's search page was unreachable or navigation timed out.
    #[error("navigation failed: {0}")]
    Navigation(anyhow::Error),

    /// The rendered document could not be read or parsed.
    #[error("extraction failed: {0}")]
    Extraction(anyhow::Error),

    /// The source's total time budget ran out before extraction finished.
    #[error("source budget of {0:?} exhausted")]
    Budget(Duration),
}

/// A failure inside the pure extraction layer.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A selector in a profile tier failed to compile. Profiles are static
    /// data, so hitting this means a profile regression, not bad input.
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}
