//! Blindspot AI - pluggable text-generation backends.
//!
//! One trait, [`GenerationBackend`], exposing a single
//! `generate(system, user) -> text` operation, with one implementing
//! variant per provider (OpenAI, Anthropic, Ollama), selected by
//! configuration at construction time via [`backend_from_config`].
//!
//! Every call runs under a timeout; the generation backend is the only
//! stage of an analysis run expected to block for tens of seconds, and a
//! timeout is reported as [`AiError::Timeout`] rather than hanging the run.

pub mod backend;
pub mod error;
pub mod providers;

pub use backend::{backend_from_config, AiConfig, GenerationBackend, DEFAULT_GENERATION_TIMEOUT};
pub use error::AiError;
pub use providers::{AnthropicBackend, OllamaBackend, OpenAiBackend};
