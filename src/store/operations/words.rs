use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduler::{self, HasWordId, HasWordStats, WordId, WordStats};
use crate::store::operations::vocabularies::VocabularyId;
use crate::store::{Store, StoreError};
use crate::validation;

/// A word pair with its learning statistics.
///
/// `goal` is the text in the language being learned, `native` its
/// translation. Older clients call them `front`/`back`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    pub vocabulary_id: VocabularyId,
    #[serde(alias = "front")]
    pub goal: String,
    #[serde(alias = "back")]
    pub native: String,
    pub score: f64,
    pub correct_count: u64,
    pub wrong_count: u64,
    pub created_at: DateTime<Utc>,
}

impl HasWordStats for Word {
    fn word_stats(&self) -> WordStats {
        WordStats::new(
            self.score,
            i64::try_from(self.correct_count).unwrap_or(i64::MAX),
            i64::try_from(self.wrong_count).unwrap_or(i64::MAX),
        )
    }
}

impl HasWordId for Word {
    fn word_id(&self) -> WordId {
        self.id
    }
}

/// Per-word statistics row used by the stats listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordStatsRow {
    pub id: WordId,
    pub goal: String,
    pub native: String,
    pub score: f64,
    pub correct: u64,
    pub mistakes: u64,
    pub priority: f64,
}

impl From<&Word> for WordStatsRow {
    fn from(w: &Word) -> Self {
        Self {
            id: w.id,
            goal: w.goal.clone(),
            native: w.native.clone(),
            score: w.score,
            correct: w.correct_count,
            mistakes: w.wrong_count,
            priority: scheduler::compute_priority(w),
        }
    }
}

fn normalize_pair(goal: &str, native: &str) -> Result<(String, String), StoreError> {
    let goal = validation::normalize_word_text(goal)
        .map_err(|m| StoreError::Validation(format!("goal: {m}")))?;
    let native = validation::normalize_word_text(native)
        .map_err(|m| StoreError::Validation(format!("native: {m}")))?;
    Ok((goal, native))
}

impl Store {
    /// Add a word pair with fresh statistics.
    pub fn add_word(
        &self,
        vocabulary_id: VocabularyId,
        goal: &str,
        native: &str,
    ) -> Result<Word, StoreError> {
        let (goal, native) = normalize_pair(goal, native)?;

        let vocabularies = self.vocabularies_read()?;
        if !vocabularies.contains_key(&vocabulary_id) {
            return Err(StoreError::not_found("vocabulary", vocabulary_id));
        }

        let word = Word {
            id: self.next_word_id(),
            vocabulary_id,
            goal,
            native,
            score: 0.0,
            correct_count: 0,
            wrong_count: 0,
            created_at: Utc::now(),
        };
        self.words_write()?.insert(word.id, word.clone());
        Ok(word)
    }

    pub fn get_word(&self, word_id: WordId) -> Result<Option<Word>, StoreError> {
        Ok(self.words_read()?.get(&word_id).cloned())
    }

    /// Replace the texts of a word; statistics are kept.
    pub fn edit_word(&self, word_id: WordId, goal: &str, native: &str) -> Result<Word, StoreError> {
        let (goal, native) = normalize_pair(goal, native)?;

        let mut words = self.words_write()?;
        let word = words
            .get_mut(&word_id)
            .ok_or_else(|| StoreError::not_found("word", word_id))?;
        word.goal = goal;
        word.native = native;
        Ok(word.clone())
    }

    pub fn delete_word(&self, word_id: WordId) -> Result<Word, StoreError> {
        self.words_write()?
            .remove(&word_id)
            .ok_or_else(|| StoreError::not_found("word", word_id))
    }

    /// Words ordered case-insensitively by goal text, then native text.
    pub fn list_words(&self, vocabulary_id: VocabularyId) -> Result<Vec<Word>, StoreError> {
        let mut words: Vec<Word> = self
            .words_read()?
            .values()
            .filter(|w| w.vocabulary_id == vocabulary_id)
            .cloned()
            .collect();
        words.sort_by_cached_key(|w| (w.goal.to_lowercase(), w.native.to_lowercase()));
        Ok(words)
    }

    pub fn count_words(&self, vocabulary_id: VocabularyId) -> Result<u64, StoreError> {
        Ok(self
            .words_read()?
            .values()
            .filter(|w| w.vocabulary_id == vocabulary_id)
            .count() as u64)
    }

    /// Statistics of every word in insertion order.
    pub fn list_word_stats(&self, vocabulary_id: VocabularyId) -> Result<Vec<WordStatsRow>, StoreError> {
        Ok(self
            .words_read()?
            .values()
            .filter(|w| w.vocabulary_id == vocabulary_id)
            .map(WordStatsRow::from)
            .collect())
    }

    /// Delete every word whose goal or native text equals one of `tokens`,
    /// compared case-insensitively. Returns the deleted words.
    pub fn delete_words_by_texts<S: AsRef<str>>(
        &self,
        vocabulary_id: VocabularyId,
        tokens: &[S],
    ) -> Result<Vec<Word>, StoreError> {
        let tokens = validation::normalize_tokens(tokens);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut words = self.words_write()?;
        let doomed: Vec<WordId> = words
            .values()
            .filter(|w| w.vocabulary_id == vocabulary_id)
            .filter(|w| {
                tokens.contains(&w.goal.to_lowercase()) || tokens.contains(&w.native.to_lowercase())
            })
            .map(|w| w.id)
            .collect();

        Ok(doomed.iter().filter_map(|id| words.remove(id)).collect())
    }

    /// The `limit` highest-priority words of a vocabulary, ties in
    /// insertion order.
    pub fn top_candidates(
        &self,
        vocabulary_id: VocabularyId,
        limit: usize,
    ) -> Result<Vec<Word>, StoreError> {
        let words: Vec<Word> = self
            .words_read()?
            .values()
            .filter(|w| w.vocabulary_id == vocabulary_id)
            .cloned()
            .collect();
        Ok(scheduler::top_candidates(words, limit))
    }

    /// Apply one answer to a word: score update and counter bump in a
    /// single write-locked read-modify-write.
    pub fn record_answer(
        &self,
        word_id: WordId,
        correct: bool,
        multiplier: f64,
    ) -> Result<Word, StoreError> {
        if !(multiplier > 1.0) {
            return Err(StoreError::Validation(format!(
                "score multiplier must be greater than 1, got {multiplier}"
            )));
        }

        let mut words = self.words_write()?;
        let word = words
            .get_mut(&word_id)
            .ok_or_else(|| StoreError::not_found("word", word_id))?;

        let updated = scheduler::apply_answer(&word.word_stats(), correct, multiplier);
        word.score = updated.clamped_score();
        word.correct_count = updated.clamped_correct();
        word.wrong_count = updated.clamped_wrong();

        tracing::debug!(
            word_id,
            correct,
            score = word.score,
            correct_count = word.correct_count,
            wrong_count = word.wrong_count,
            "Answer recorded"
        );
        Ok(word.clone())
    }
}
