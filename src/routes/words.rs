use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::{JsonBody, QueryParams};
use crate::response::{created, ok, AppError};
use crate::scheduler::{compute_priority, WordId};
use crate::state::AppState;
use crate::store::operations::vocabularies::VocabularyId;
use crate::store::operations::words::Word;
use crate::store::StoreError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/vocabularies/:vocabulary_id/words",
            get(list_words).post(add_word),
        )
        .route("/vocabularies/:vocabulary_id/words/count", get(count_words))
        .route("/vocabularies/:vocabulary_id/words/stats", get(word_stats))
        .route("/vocabularies/:vocabulary_id/words/top", get(top_words))
        .route(
            "/vocabularies/:vocabulary_id/words/delete-by-text",
            post(delete_by_text),
        )
        .route(
            "/words/:word_id",
            get(get_word).put(edit_word).delete(delete_word),
        )
}

#[derive(Debug, Deserialize)]
struct WordTexts {
    #[serde(alias = "front")]
    goal: String,
    #[serde(alias = "back")]
    native: String,
}

fn ensure_vocabulary(state: &AppState, vocabulary_id: VocabularyId) -> Result<(), AppError> {
    match state.store().get_vocabulary(vocabulary_id)? {
        Some(_) => Ok(()),
        None => Err(StoreError::not_found("vocabulary", vocabulary_id).into()),
    }
}

async fn list_words(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
) -> Result<impl IntoResponse, AppError> {
    ensure_vocabulary(&state, vocabulary_id)?;
    Ok(ok(state.store().list_words(vocabulary_id)?))
}

async fn add_word(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
    JsonBody(req): JsonBody<WordTexts>,
) -> Result<impl IntoResponse, AppError> {
    let word = state
        .store()
        .add_word(vocabulary_id, &req.goal, &req.native)?;
    Ok(created(word))
}

async fn count_words(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
) -> Result<impl IntoResponse, AppError> {
    ensure_vocabulary(&state, vocabulary_id)?;
    let count = state.store().count_words(vocabulary_id)?;
    Ok(ok(serde_json::json!({ "count": count })))
}

async fn word_stats(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
) -> Result<impl IntoResponse, AppError> {
    ensure_vocabulary(&state, vocabulary_id)?;
    Ok(ok(state.store().list_word_stats(vocabulary_id)?))
}

#[derive(Debug, Deserialize)]
struct TopQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedWord {
    #[serde(flatten)]
    word: Word,
    priority: f64,
}

/// The priority window sessions pick from, highest priority first.
async fn top_words(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
    QueryParams(query): QueryParams<TopQuery>,
) -> Result<impl IntoResponse, AppError> {
    ensure_vocabulary(&state, vocabulary_id)?;
    let limit = query
        .limit
        .unwrap_or(state.config().scheduler.candidate_limit);
    let ranked: Vec<RankedWord> = state
        .store()
        .top_candidates(vocabulary_id, limit)?
        .into_iter()
        .map(|word| RankedWord {
            priority: compute_priority(&word),
            word,
        })
        .collect();
    Ok(ok(ranked))
}

#[derive(Debug, Deserialize)]
struct DeleteByTextRequest {
    texts: Vec<String>,
}

async fn delete_by_text(
    State(state): State<AppState>,
    Path(vocabulary_id): Path<VocabularyId>,
    JsonBody(req): JsonBody<DeleteByTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_vocabulary(&state, vocabulary_id)?;
    let deleted = state
        .store()
        .delete_words_by_texts(vocabulary_id, &req.texts)?;
    tracing::info!(vocabulary_id, deleted = deleted.len(), "Words deleted by text");
    Ok(ok(serde_json::json!({
        "deleted": deleted.len(),
        "words": deleted,
    })))
}

async fn get_word(
    State(state): State<AppState>,
    Path(word_id): Path<WordId>,
) -> Result<impl IntoResponse, AppError> {
    let word = state
        .store()
        .get_word(word_id)?
        .ok_or_else(|| StoreError::not_found("word", word_id))?;
    Ok(ok(word))
}

async fn edit_word(
    State(state): State<AppState>,
    Path(word_id): Path<WordId>,
    JsonBody(req): JsonBody<WordTexts>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store().edit_word(word_id, &req.goal, &req.native)?))
}

async fn delete_word(
    State(state): State<AppState>,
    Path(word_id): Path<WordId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store().delete_word(word_id)?))
}
