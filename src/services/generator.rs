// src/services/generator.rs
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode upstream response: {0}")]
    Decode(String),

    #[error("prompt blocked by upstream: {0}")]
    Blocked(String),
}

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, UpstreamError>;
}
