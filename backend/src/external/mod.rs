//! External API integrations

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of a text-generation call. Callers collapse these into a
/// single user-facing failure; the detail is only for logs.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API credential missing from environment variable {0}")]
    MissingCredential(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Malformed(String),
}

/// A free-text prompt in, free-text (Markdown) out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}
