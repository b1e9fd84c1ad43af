use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{JsonBody, QueryParams};
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::users::UserId;
use crate::store::operations::vocabularies::VocabularyId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/vocabularies/:vocabulary_id/sessions",
            post(start_session),
        )
        .route(
            "/sessions/:session_id",
            get(get_session).delete(finish_session),
        )
        .route("/sessions/:session_id/next", post(next_word))
        .route("/sessions/:session_id/answer", post(submit_answer))
}

/// `?userId=` on session calls; sessions answer only to their learner.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerQuery {
    user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionRequest {
    user_id: UserId,
}

async fn start_session(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
    JsonBody(req): JsonBody<StartSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions().start(req.user_id, vocabulary_id).await?;
    Ok(created(session))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.sessions().snapshot(session_id, owner.user_id).await?))
}

async fn next_word(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.sessions().next(session_id, owner.user_id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest {
    user_id: UserId,
    correct: bool,
}

async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    JsonBody(req): JsonBody<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state
        .sessions()
        .answer(session_id, req.user_id, req.correct)
        .await?))
}

async fn finish_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.sessions().finish(session_id, owner.user_id).await?))
}
