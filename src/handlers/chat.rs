use crate::dtos::{ChatRequest, ChatResponse};
use crate::error::AppError;
use crate::startup::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

/// Relay one chat turn to the language model and return its reply.
pub async fn chat_relay(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let reply = state
        .chat
        .relay(&request.message, request.context.as_deref())
        .await?;

    Ok(Json(ChatResponse { reply }))
}
