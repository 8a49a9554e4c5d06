//! Generation backend error types.

use thiserror::Error;

/// Generation backend errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Missing API key for a provider. A configuration error, raised at
    /// the point of use and actionable by the user.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Unknown or invalid backend configuration.
    #[error("Invalid backend configuration: {0}")]
    InvalidConfig(String),

    /// Provider API error (auth, HTTP, malformed response envelope).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The generation call exceeded its timeout.
    #[error("Generation timed out after {seconds}s ({provider})")]
    Timeout {
        /// The provider that timed out
        provider: String,
        /// The configured timeout in seconds
        seconds: u64,
    },
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a new invalid-configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
