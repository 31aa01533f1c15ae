// src/client/relay.rs
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::message::{ChatRequest, ChatResponse, ErrorResponse};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected relay response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn send(&self, input: &str) -> Result<String, ClientError>;
}

/// HTTP client for the relay's `/api/chat` route.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RelayApi for RelayClient {
    async fn send(&self, input: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&ChatRequest { input: input.to_string() })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<ChatResponse>(&body)
            .map(|r| r.message)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
