use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::chats::ChatId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chats", post(register_chat))
        .route("/chats/:chat_id", get(get_chat))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterChatRequest {
    chat_id: ChatId,
    title: String,
}

/// Get-or-create a group chat; the stored title follows the latest call.
async fn register_chat(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let chat = state.store().get_or_create_chat(req.chat_id, &req.title)?;
    tracing::debug!(chat_id = chat.chat_id, "Chat registered");
    Ok(ok(chat))
}

async fn get_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<ChatId>,
) -> Result<impl IntoResponse, AppError> {
    let chat = state
        .store()
        .get_chat(chat_id)?
        .ok_or_else(|| AppError::not_found("CHAT_NOT_FOUND", "chat not found"))?;
    Ok(ok(chat))
}
