//! Hosted LLM client used by the chat endpoint.
//!
//! [`TextGenerator`] is the seam the API depends on; [`GeminiClient`] is the
//! production implementation against the Google Generative Language API.

pub mod config;
pub mod error;
pub mod gemini;

use async_trait::async_trait;

pub use config::GeminiConfig;
pub use error::GenAiError;
pub use gemini::GeminiClient;

/// Turns a single prompt into a single text completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}
