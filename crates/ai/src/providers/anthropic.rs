//! Anthropic messages backend.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::backend::GenerationBackend;
use crate::error::AiError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 4000;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic messages backend.
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl AnthropicBackend {
    pub fn new(api_key: String, model: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        }
    }

    async fn call(&self, system: &str, user: &str) -> Result<String, AiError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::provider(format!("anthropic request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::provider(format!(
                "anthropic returned {}: {}",
                status, body
            )));
        }

        let data: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AiError::provider(format!("anthropic response parse failed: {}", e)))?;

        Ok(data
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default())
    }
}

#[async_trait]
impl GenerationBackend for AnthropicBackend {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        debug!(
            "Dispatching generation request to anthropic ({})",
            self.model
        );

        tokio::time::timeout(self.timeout, self.call(system, user))
            .await
            .map_err(|_| AiError::Timeout {
                provider: "anthropic".to_string(),
                seconds: self.timeout.as_secs(),
            })?
    }
}
