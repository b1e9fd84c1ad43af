//! Exercise sessions: one learner drilling one vocabulary.
//!
//! Each session owns its recency buffer, so sessions never share
//! scheduling state.

pub mod registry;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::scheduler::{RecencyBuffer, WordId};
use crate::store::operations::users::UserId;
use crate::store::operations::vocabularies::VocabularyId;
use crate::store::operations::words::Word;
use crate::store::StoreError;

pub use registry::SessionRegistry;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("exercise session not found: {0}")]
    NotFound(Uuid),
    #[error("no word awaiting an answer in session {0}")]
    NoPendingWord(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct ExerciseSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub vocabulary_id: VocabularyId,
    pub recency: RecencyBuffer,
    pub pending: Option<WordId>,
    pub shown: u32,
    pub correct: u32,
    pub wrong: u32,
    pub started_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl ExerciseSession {
    pub fn new(user_id: UserId, vocabulary_id: VocabularyId, recency_capacity: usize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            vocabulary_id,
            recency: RecencyBuffer::new(recency_capacity),
            pending: None,
            shown: 0,
            correct: 0,
            wrong: 0,
            started_at: now,
            last_active_at: now,
        }
    }

    /// Mark `word_id` as shown and awaiting an answer.
    pub fn present(&mut self, word_id: WordId) {
        self.recency.push(word_id);
        self.pending = Some(word_id);
        self.shown += 1;
        self.touch();
    }

    pub fn tally(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    pub fn summary(&self, reason: EndReason) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            vocabulary_id: self.vocabulary_id,
            shown: self.shown,
            correct: self.correct,
            wrong: self.wrong,
            reason,
            started_at: self.started_at,
            ended_at: Utc::now(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            user_id: self.user_id,
            vocabulary_id: self.vocabulary_id,
            pending_word_id: self.pending,
            recent_word_ids: self.recency.iter().collect(),
            shown: self.shown,
            correct: self.correct,
            wrong: self.wrong,
            started_at: self.started_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    Stopped,
    /// The vocabulary had no words left to drill.
    Exhausted,
    Expired,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub vocabulary_id: VocabularyId,
    pub shown: u32,
    pub correct: u32,
    pub wrong: u32,
    pub reason: EndReason,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub user_id: UserId,
    pub vocabulary_id: VocabularyId,
    pub pending_word_id: Option<WordId>,
    pub recent_word_ids: Vec<WordId>,
    pub shown: u32,
    pub correct: u32,
    pub wrong: u32,
    pub started_at: DateTime<Utc>,
}

/// Result of asking a session for its next word.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum NextWord {
    Word { word: Word },
    /// The vocabulary is empty; the session has been closed.
    Finished { summary: SessionSummary },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub correct: bool,
    pub word: Word,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_updates_recency_and_pending() {
        let mut session = ExerciseSession::new(1, 2, 2);
        session.present(10);
        session.present(11);
        session.present(12);

        assert_eq!(session.pending, Some(12));
        assert_eq!(session.shown, 3);
        assert_eq!(session.snapshot().recent_word_ids, vec![11, 12]);
    }

    #[test]
    fn summary_counts_answers() {
        let mut session = ExerciseSession::new(1, 2, 8);
        session.tally(true);
        session.tally(false);
        session.tally(false);

        let summary = session.summary(EndReason::Stopped);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.wrong, 2);
        assert_eq!(summary.reason, EndReason::Stopped);
    }

    #[test]
    fn next_word_is_tagged() {
        let session = ExerciseSession::new(1, 2, 8);
        let next = NextWord::Finished {
            summary: session.summary(EndReason::Exhausted),
        };
        let json = serde_json::to_value(next).unwrap();
        assert_eq!(json["status"], "finished");
        assert_eq!(json["summary"]["reason"], "exhausted");
    }
}
