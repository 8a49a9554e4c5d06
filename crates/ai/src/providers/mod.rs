//! Provider integrations, one module per backend.

mod anthropic;
mod ollama;
mod openai;

pub use anthropic::AnthropicBackend;
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
