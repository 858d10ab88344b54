//! Handlers for the AI assistant.
//!
//! `POST /chat` validates and sanitises the message, sends one templated
//! prompt to the model and returns the text unmodified.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use opsconsole_core::chat::{build_prompt, sanitize_message, validate_message, QUICK_ACTIONS};
use opsconsole_core::types::DbId;
use opsconsole_db::models::NewChatMessage;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub user_id: DbId,
}

/// POST /api/v1/chat
///
/// Body `{ "message": string, "user_id"?: number }`. The body is taken as raw
/// JSON so a missing or non-string `message` gets the chat-specific 400. A
/// body that is not JSON at all answers like a failed generation (500).
/// When `user_id` is present the exchange is saved to the history; a failed
/// save is logged and does not affect the reply.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<ChatReply>> {
    let Json(body) = payload.map_err(|e| AppError::ChatBody(e.body_text()))?;
    let message = validate_message(body.get("message"))?;
    let prompt = build_prompt(&sanitize_message(message));

    let response = state.generator.generate(&prompt).await?;

    if let Some(user_id) = body.get("user_id").and_then(serde_json::Value::as_i64) {
        let input = NewChatMessage {
            user_id,
            message: message.to_string(),
            response: response.clone(),
        };
        if let Err(e) = state.store.save_chat_message(&input).await {
            tracing::warn!(error = %e, user_id, "Failed to save chat exchange");
        }
    }

    tracing::debug!(
        message_chars = message.chars().count(),
        response_chars = response.chars().count(),
        "Chat reply generated"
    );

    Ok(Json(ChatReply { response }))
}

/// GET /api/v1/chat/history?user_id=
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let messages = state.store.chat_history(params.user_id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/v1/chat/quick-actions
pub async fn quick_actions() -> impl IntoResponse {
    Json(DataResponse {
        data: QUICK_ACTIONS,
    })
}
