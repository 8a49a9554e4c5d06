//! Generation backend trait and configuration-driven factory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AiError;
use crate::providers::{AnthropicBackend, OllamaBackend, OpenAiBackend};

/// Default timeout for a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// A pluggable text-generation backend.
///
/// Implementations wrap one provider API and expose a single one-shot
/// operation. Callers never branch on the concrete provider; selection
/// happens once, at construction, in [`backend_from_config`].
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Identifier used in logs and degraded-mode summaries ("openai", ...).
    fn id(&self) -> &'static str;

    /// Send a system instruction and user context, return the raw response
    /// text. The call must complete (or fail with [`AiError::Timeout`])
    /// within the backend's configured timeout.
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError>;
}

/// Backend configuration, normally sourced from the environment.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider id: "openai" | "anthropic" | "ollama".
    pub provider: String,
    pub api_key: Option<String>,
    /// Base URL override; only meaningful for Ollama.
    pub base_url: Option<String>,
    /// Model override; each backend has a sensible default.
    pub model: Option<String>,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            api_key: None,
            base_url: None,
            model: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// Construct the configured backend.
///
/// A missing API key for a keyed provider is a configuration error raised
/// here, at the point of use, so the caller can surface it as actionable
/// rather than as a generic provider failure.
pub fn backend_from_config(config: &AiConfig) -> Result<Arc<dyn GenerationBackend>, AiError> {
    match config.provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| AiError::MissingApiKey("openai".to_string()))?;
            Ok(Arc::new(OpenAiBackend::new(
                api_key,
                config.model.clone(),
                config.timeout,
            )))
        }
        "anthropic" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| AiError::MissingApiKey("anthropic".to_string()))?;
            Ok(Arc::new(AnthropicBackend::new(
                api_key,
                config.model.clone(),
                config.timeout,
            )))
        }
        "ollama" => Ok(Arc::new(OllamaBackend::new(
            config.base_url.clone(),
            config.model.clone(),
            config.timeout,
        ))),
        other => Err(AiError::invalid_config(format!(
            "Unknown AI provider: {}",
            other
        ))),
    }
}
