//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// The enrichment collector treats every variant as a per-symbol failure:
/// the symbol is logged and skipped, the batch continues. The
/// [`is_transient`](Self::is_transient) classification exists so callers can
/// decide whether a later run is worth attempting for the same symbol.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// Terminal - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but has no quotes in the requested period.
    #[error("No data for date range")]
    NoDataForRange,

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The operation is not supported by this provider.
    #[error("Operation not supported by {provider}: {operation}")]
    NotSupported {
        /// The unsupported operation
        operation: String,
        /// The provider that does not support it
        provider: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether a later fetch for the same symbol has a chance of succeeding.
    ///
    /// Terminal failures (unknown symbol, no data, unsupported operation)
    /// return `false`; everything network-shaped returns `true`.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::SymbolNotFound(_) | Self::NoDataForRange | Self::NotSupported { .. } => false,
            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::Network(_) => true,
        }
    }
}
