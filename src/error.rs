// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;
use crate::services::generator::UpstreamError;

pub const GENERATION_FAILED: &str = "Failed to generate response";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unusable chat input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every failure looks the same to the caller; causes stay in the server log.
        let body = ErrorResponse {
            error: GENERATION_FAILED.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
