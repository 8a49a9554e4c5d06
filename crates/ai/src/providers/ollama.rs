//! Local Ollama chat backend.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::backend::GenerationBackend;
use crate::error::AiError;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.1:8b";
const TEMPERATURE: f64 = 0.3;
const NUM_PREDICT: u32 = 4000;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Local Ollama backend. No API key; the base URL points at the local
/// daemon by default.
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaBackend {
    pub fn new(base_url: Option<String>, model: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        }
    }

    async fn call(&self, system: &str, user: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: TEMPERATURE,
                num_predict: NUM_PREDICT,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::provider(format!("ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::provider(format!(
                "ollama returned {}: {}",
                status, body
            )));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::provider(format!("ollama response parse failed: {}", e)))?;

        Ok(data.message.map(|m| m.content).unwrap_or_default())
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn id(&self) -> &'static str {
        "ollama"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        debug!("Dispatching generation request to ollama ({})", self.model);

        tokio::time::timeout(self.timeout, self.call(system, user))
            .await
            .map_err(|_| AiError::Timeout {
                provider: "ollama".to_string(),
                seconds: self.timeout.as_secs(),
            })?
    }
}
