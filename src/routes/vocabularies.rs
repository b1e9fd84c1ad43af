use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::Router;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::users::UserId;
use crate::store::operations::vocabularies::{NewVocabulary, VocabularyId};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/vocabularies",
            get(list_vocabularies).post(create_vocabulary),
        )
        .route(
            "/users/:user_id/vocabularies/:vocabulary_id",
            put(rename_vocabulary)
                .get(get_vocabulary)
                .delete(delete_vocabulary),
        )
}

async fn list_vocabularies(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store().list_vocabularies(user_id)?))
}

async fn create_vocabulary(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    JsonBody(req): JsonBody<NewVocabulary>,
) -> Result<impl IntoResponse, AppError> {
    let vocabulary = state.store().create_vocabulary(user_id, &req)?;
    tracing::info!(vocabulary_id = vocabulary.id, user_id, "Vocabulary created");
    Ok(created(vocabulary))
}

async fn get_vocabulary(
    State(state): State<AppState>,
    Path((user_id, vocabulary_id)): Path<(UserId, VocabularyId)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store().get_owned_vocabulary(user_id, vocabulary_id)?))
}

#[derive(Debug, Deserialize)]
struct RenameRequest {
    name: String,
}

async fn rename_vocabulary(
    State(state): State<AppState>,
    Path((user_id, vocabulary_id)): Path<(UserId, VocabularyId)>,
    JsonBody(req): JsonBody<RenameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let vocabulary = state
        .store()
        .rename_vocabulary(user_id, vocabulary_id, &req.name)?;
    Ok(ok(vocabulary))
}

async fn delete_vocabulary(
    State(state): State<AppState>,
    Path((user_id, vocabulary_id)): Path<(UserId, VocabularyId)>,
) -> Result<StatusCode, AppError> {
    state.store().delete_vocabulary(user_id, vocabulary_id)?;
    Ok(StatusCode::NO_CONTENT)
}
