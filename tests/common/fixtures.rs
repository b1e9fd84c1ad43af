use axum::http::Method;
use axum::Router;
use serde_json::json;

use vocab_drill::store::operations::vocabularies::{NewVocabulary, Vocabulary};
use vocab_drill::store::operations::words::Word;
use vocab_drill::store::Store;

use super::http::{assert_status_ok_json, call};

pub fn new_vocabulary(name: &str) -> NewVocabulary {
    NewVocabulary {
        name: name.to_string(),
        goal_language: "Spanish".to_string(),
        native_language: "English".to_string(),
        goal_code: "es".to_string(),
        native_code: "en".to_string(),
        level: "B1".to_string(),
    }
}

pub fn seed_vocabulary(store: &Store, owner_id: i64, name: &str) -> Vocabulary {
    store
        .create_vocabulary(owner_id, &new_vocabulary(name))
        .expect("create seed vocabulary")
}

pub fn seed_words(store: &Store, vocabulary_id: u64, pairs: &[(&str, &str)]) -> Vec<Word> {
    pairs
        .iter()
        .map(|(goal, native)| {
            store
                .add_word(vocabulary_id, goal, native)
                .expect("add seed word")
        })
        .collect()
}

/// Create a vocabulary through the API and return its id.
pub async fn create_vocabulary_via_api(app: &Router, user_id: i64, name: &str) -> u64 {
    let (status, body) = call(
        app,
        Method::POST,
        &format!("/api/users/{user_id}/vocabularies"),
        Some(json!({
            "name": name,
            "goalLanguage": "Spanish",
            "nativeLanguage": "English",
            "goalCode": "ES",
            "nativeCode": "EN",
        })),
    )
    .await;
    assert_status_ok_json(status, &body);
    body["data"]["id"].as_u64().expect("vocabulary id")
}

pub async fn add_word_via_api(app: &Router, vocabulary_id: u64, goal: &str, native: &str) -> u64 {
    let (status, body) = call(
        app,
        Method::POST,
        &format!("/api/vocabularies/{vocabulary_id}/words"),
        Some(json!({ "goal": goal, "native": native })),
    )
    .await;
    assert_status_ok_json(status, &body);
    body["data"]["id"].as_u64().expect("word id")
}
