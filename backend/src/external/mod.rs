//! External API integrations
//!
//! The remote text-generation endpoint sits behind [`TextGenerator`] so the
//! recommendation pipeline can run against any implementation.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// One structured-output generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub api_key: String,
    pub model: String,
    pub contents: String,
    pub system_instruction: String,
    pub response_mime_type: String,
}

/// A transport or endpoint failure reported by a [`TextGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Remote text-generation endpoint
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one generation and return the raw text of the reply
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure>;
}
