use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::extractors::{JsonBody, QueryParams};
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::sentences::{NewSentenceExample, SentenceQuery};
use crate::store::operations::users::UserId;
use crate::store::operations::vocabularies::VocabularyId;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/vocabularies/:vocabulary_id/sentences",
        get(recent_sentences).post(save_sentence),
    )
}

async fn save_sentence(
    State(state): State<AppState>,
    Path((user_id, vocabulary_id)): Path<(UserId, VocabularyId)>,
    JsonBody(req): JsonBody<NewSentenceExample>,
) -> Result<impl IntoResponse, AppError> {
    state.store().get_owned_vocabulary(user_id, vocabulary_id)?;
    let entry = state
        .store()
        .save_sentence_example(user_id, vocabulary_id, &req)?;
    Ok(created(entry))
}

async fn recent_sentences(
    State(state): State<AppState>,
    Path((user_id, vocabulary_id)): Path<(UserId, VocabularyId)>,
    QueryParams(query): QueryParams<SentenceQuery>,
) -> Result<impl IntoResponse, AppError> {
    state.store().get_owned_vocabulary(user_id, vocabulary_id)?;
    let sentences = state
        .store()
        .recent_sentence_examples(user_id, vocabulary_id, &query)?;
    Ok(ok(sentences))
}
