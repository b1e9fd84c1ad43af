use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::users::{build_name, UserId};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users/:user_id", get(get_user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUserRequest {
    user_id: UserId,
    first_name: String,
    #[serde(default)]
    last_name: Option<String>,
}

/// Get-or-create by chat user id; the display name is refreshed every call.
async fn register_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = build_name(&req.first_name, req.last_name.as_deref());
    let user = state.store().get_or_create_user(req.user_id, &name)?;
    Ok(ok(user))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .store()
        .get_user(user_id)?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "user not found"))?;
    Ok(ok(user))
}
