//! Core error types for the analysis pipeline.
//!
//! Only two kinds of failure are allowed to abort a run: an unknown
//! portfolio at the initial lookup, and a persistence failure on the final
//! result write. Everything else is caught at the per-item or per-call
//! boundary and degraded to an empty/partial contribution.

use thiserror::Error;

use blindspot_ai::AiError;
use blindspot_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown portfolio or user. Surfaced to the caller, not retried.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Market data operation failed. Callers at batch boundaries catch
    /// this per symbol rather than propagating it.
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// Generation backend failed. The signal generator downgrades this to
    /// an empty generated-signal list; it never aborts the run.
    #[error("Generation backend failed: {0}")]
    Generation(#[from] AiError),

    /// Persistence collaborator failure. Propagates from the final result
    /// write; enrichment cache writes are logged and swallowed instead.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Missing or invalid configuration, raised at the point of use.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unexpected error.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
