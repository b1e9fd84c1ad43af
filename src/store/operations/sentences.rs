use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::operations::users::UserId;
use crate::store::operations::vocabularies::VocabularyId;
use crate::store::{Store, StoreError};
use crate::validation;

pub const DEFAULT_SENTENCE_LIMIT: usize = 50;
pub const MAX_SENTENCE_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Sentence,
    Word,
}

/// Translation direction of an exercise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    /// Goal language shown, native answer expected.
    #[serde(rename = "gn")]
    GoalToNative,
    #[serde(rename = "ng")]
    NativeToGoal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentenceLogEntry {
    pub id: u64,
    pub user_id: UserId,
    pub vocabulary_id: VocabularyId,
    pub exercise_kind: ExerciseKind,
    pub direction: Direction,
    pub goal_word: Option<String>,
    pub native_word: Option<String>,
    pub sentence: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSentenceExample {
    pub direction: Direction,
    #[serde(default)]
    pub goal_word: Option<String>,
    #[serde(default)]
    pub native_word: Option<String>,
    pub sentence: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceQuery {
    pub direction: Direction,
    #[serde(default)]
    pub goal_word: Option<String>,
    #[serde(default)]
    pub native_word: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SentenceQuery {
    fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SENTENCE_LIMIT)
            .clamp(1, MAX_SENTENCE_LIMIT)
    }
}

fn same_word(stored: &Option<String>, wanted: &Option<String>) -> bool {
    stored.as_deref().unwrap_or("") == wanted.as_deref().unwrap_or("")
}

impl Store {
    /// Remember a generated example sentence so later generations can avoid it.
    pub fn save_sentence_example(
        &self,
        user_id: UserId,
        vocabulary_id: VocabularyId,
        input: &NewSentenceExample,
    ) -> Result<SentenceLogEntry, StoreError> {
        let sentence = validation::normalize_sentence(&input.sentence)
            .map_err(|m| StoreError::Validation(m.to_string()))?;

        let entry = SentenceLogEntry {
            id: self.next_sentence_id(),
            user_id,
            vocabulary_id,
            exercise_kind: ExerciseKind::Sentence,
            direction: input.direction,
            goal_word: input.goal_word.clone(),
            native_word: input.native_word.clone(),
            sentence,
            created_at: Utc::now(),
        };
        self.sentences_write()?.push(entry.clone());
        Ok(entry)
    }

    /// Recent sentences, newest first, de-duplicated.
    ///
    /// Widens in three tiers until `limit` is reached: same word pair, same
    /// vocabulary and direction, then anything the user was shown.
    pub fn recent_sentence_examples(
        &self,
        user_id: UserId,
        vocabulary_id: VocabularyId,
        query: &SentenceQuery,
    ) -> Result<Vec<String>, StoreError> {
        let limit = query.effective_limit();
        let sentences = self.sentences_read()?;
        let rows: &[SentenceLogEntry] = &sentences;

        let users_newest_first = move || rows.iter().rev().filter(move |e| e.user_id == user_id);
        let same_track = |e: &&SentenceLogEntry| {
            e.vocabulary_id == vocabulary_id
                && e.exercise_kind == ExerciseKind::Sentence
                && e.direction == query.direction
        };

        // Each tier reads at most `limit` rows, like a LIMIT clause would.
        let exact = users_newest_first()
            .filter(same_track)
            .filter(|e| {
                same_word(&e.goal_word, &query.goal_word)
                    && same_word(&e.native_word, &query.native_word)
            })
            .take(limit);
        let track = users_newest_first().filter(same_track).take(limit);
        let any = users_newest_first().take(limit);

        let mut out: Vec<String> = Vec::with_capacity(limit);
        for entry in exact.chain(track).chain(any) {
            if out.len() >= limit {
                break;
            }
            if !out.contains(&entry.sentence) {
                out.push(entry.sentence.clone());
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(direction: Direction, goal: &str, sentence: &str) -> NewSentenceExample {
        NewSentenceExample {
            direction,
            goal_word: Some(goal.to_string()),
            native_word: None,
            sentence: sentence.to_string(),
        }
    }

    fn query(direction: Direction, goal: &str, limit: usize) -> SentenceQuery {
        SentenceQuery {
            direction,
            goal_word: Some(goal.to_string()),
            native_word: None,
            limit: Some(limit),
        }
    }

    #[test]
    fn exact_matches_come_first_then_widen() {
        let store = Store::new();
        let gn = Direction::GoalToNative;
        store
            .save_sentence_example(1, 10, &example(gn, "casa", "La casa es grande."))
            .unwrap();
        store
            .save_sentence_example(1, 10, &example(gn, "perro", "El perro ladra."))
            .unwrap();
        store
            .save_sentence_example(1, 11, &example(Direction::NativeToGoal, "x", "Other deck."))
            .unwrap();
        store
            .save_sentence_example(1, 10, &example(gn, "casa", "Mi casa es tu casa."))
            .unwrap();
        store
            .save_sentence_example(2, 10, &example(gn, "casa", "Not mine."))
            .unwrap();

        let got = store
            .recent_sentence_examples(1, 10, &query(gn, "casa", 10))
            .unwrap();
        assert_eq!(
            got,
            vec![
                "Mi casa es tu casa.",
                "La casa es grande.",
                "El perro ladra.",
                "Other deck.",
            ]
        );
    }

    #[test]
    fn limit_is_respected_and_clamped() {
        let store = Store::new();
        for i in 0..5 {
            store
                .save_sentence_example(
                    1,
                    10,
                    &example(Direction::GoalToNative, "casa", &format!("s{i}")),
                )
                .unwrap();
        }

        let two = store
            .recent_sentence_examples(1, 10, &query(Direction::GoalToNative, "casa", 2))
            .unwrap();
        assert_eq!(two, vec!["s4", "s3"]);

        let zero = store
            .recent_sentence_examples(1, 10, &query(Direction::GoalToNative, "casa", 0))
            .unwrap();
        assert_eq!(zero.len(), 1);
    }

    #[test]
    fn blank_sentence_rejected() {
        let store = Store::new();
        assert!(matches!(
            store.save_sentence_example(1, 1, &example(Direction::GoalToNative, "a", "  ")),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn direction_uses_short_codes() {
        let json = serde_json::to_string(&Direction::NativeToGoal).unwrap();
        assert_eq!(json, "\"ng\"");
    }
}
