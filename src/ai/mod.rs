// src/ai/mod.rs

//! External text generation.

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiClient;

/// Failures of the generation call itself (network, auth, quota).
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API_KEY is not configured")]
    MissingApiKey,

    /// Never carries the request URL.
    #[error("request to generation service failed: {0}")]
    Http(reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation service returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Http(err.without_url())
    }
}

/// Anything that turns a prompt into raw model text.
///
/// Implementations make exactly one round trip per call and never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}
