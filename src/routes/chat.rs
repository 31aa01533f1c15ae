use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // A body without a string `input` fails like an upstream error would.
    let Json(payload) = payload.map_err(|rejection| {
        tracing::error!("Error generating content: {}", rejection.body_text());
        AppError::InvalidInput(rejection.body_text())
    })?;

    // Forwarded as-is, no trimming or length checks.
    let message = state
        .generator
        .generate_text(&payload.input)
        .await
        .map_err(|e| {
            tracing::error!("Error generating content: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(ChatResponse { message }))
}
