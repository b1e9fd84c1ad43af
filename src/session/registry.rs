use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::scheduler::pick_next;
use crate::session::{
    AnswerOutcome, EndReason, ExerciseSession, NextWord, SessionError, SessionSnapshot,
    SessionSummary,
};
use crate::store::operations::users::UserId;
use crate::store::operations::vocabularies::VocabularyId;
use crate::store::Store;

/// Live exercise sessions keyed by id.
///
/// Calls for one session are serialized by the write lock; the store is
/// only touched while it is held, never across an await. Every call names
/// the learner, and a session owned by someone else reads as not found.
pub struct SessionRegistry {
    store: Arc<Store>,
    config: SchedulerConfig,
    idle_timeout: Option<Duration>,
    sessions: RwLock<HashMap<Uuid, ExerciseSession>>,
}

impl SessionRegistry {
    pub fn new(store: Arc<Store>, config: SchedulerConfig) -> Self {
        Self {
            store,
            config,
            idle_timeout: None,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Expire idle sessions whenever a new one starts, on top of any
    /// cleanup worker.
    pub fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Open a session on a vocabulary owned by `user_id`.
    pub async fn start(
        &self,
        user_id: UserId,
        vocabulary_id: VocabularyId,
    ) -> Result<SessionSnapshot, SessionError> {
        self.store.get_owned_vocabulary(user_id, vocabulary_id)?;

        let session = ExerciseSession::new(user_id, vocabulary_id, self.config.recency_capacity);
        let snapshot = session.snapshot();

        let mut sessions = self.sessions.write().await;
        if let Some(max_idle) = self.idle_timeout {
            let expired = evict_locked(&mut sessions, max_idle);
            if !expired.is_empty() {
                tracing::info!(expired = expired.len(), "Idle sessions expired on start");
            }
        }
        sessions.insert(session.id, session);
        drop(sessions);

        tracing::info!(
            session_id = %snapshot.session_id,
            user_id,
            vocabulary_id,
            "Exercise session started"
        );
        Ok(snapshot)
    }

    pub async fn snapshot(
        &self,
        session_id: Uuid,
        user_id: UserId,
    ) -> Result<SessionSnapshot, SessionError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .filter(|s| s.user_id == user_id)
            .map(ExerciseSession::snapshot)
            .ok_or(SessionError::NotFound(session_id))
    }

    /// Choose the next word. An empty vocabulary closes the session.
    pub async fn next(&self, session_id: Uuid, user_id: UserId) -> Result<NextWord, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = owned_mut(&mut sessions, session_id, user_id)?;

        let candidates = self
            .store
            .top_candidates(session.vocabulary_id, self.config.candidate_limit)?;

        match pick_next(&candidates, &session.recency) {
            Some(word) => {
                session.present(word.id);
                tracing::debug!(
                    session_id = %session_id,
                    word_id = word.id,
                    window = candidates.len(),
                    "Next word picked"
                );
                Ok(NextWord::Word { word: word.clone() })
            }
            None => {
                let summary = session.summary(EndReason::Exhausted);
                sessions.remove(&session_id);
                tracing::info!(session_id = %session_id, "Vocabulary empty, session closed");
                Ok(NextWord::Finished { summary })
            }
        }
    }

    /// Record the judged answer for the word currently shown.
    pub async fn answer(
        &self,
        session_id: Uuid,
        user_id: UserId,
        correct: bool,
    ) -> Result<AnswerOutcome, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = owned_mut(&mut sessions, session_id, user_id)?;

        // Taken up front: a word deleted mid-session must not pin the session.
        let word_id = session
            .pending
            .take()
            .ok_or(SessionError::NoPendingWord(session_id))?;
        let word = self
            .store
            .record_answer(word_id, correct, self.config.score_multiplier)?;

        session.tally(correct);

        Ok(AnswerOutcome { correct, word })
    }

    /// Close a session at the learner's request.
    pub async fn finish(
        &self,
        session_id: Uuid,
        user_id: UserId,
    ) -> Result<SessionSummary, SessionError> {
        let mut sessions = self.sessions.write().await;
        owned_mut(&mut sessions, session_id, user_id)?;
        let session = sessions
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        drop(sessions);

        let summary = session.summary(EndReason::Stopped);
        tracing::info!(
            session_id = %session_id,
            shown = summary.shown,
            correct = summary.correct,
            wrong = summary.wrong,
            "Exercise session finished"
        );
        Ok(summary)
    }

    /// Drop sessions idle for longer than `max_idle`. Returns their summaries.
    pub async fn evict_idle(&self, max_idle: Duration) -> Vec<SessionSummary> {
        evict_locked(&mut *self.sessions.write().await, max_idle)
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn owned_mut(
    sessions: &mut HashMap<Uuid, ExerciseSession>,
    session_id: Uuid,
    user_id: UserId,
) -> Result<&mut ExerciseSession, SessionError> {
    sessions
        .get_mut(&session_id)
        .filter(|s| s.user_id == user_id)
        .ok_or(SessionError::NotFound(session_id))
}

fn evict_locked(
    sessions: &mut HashMap<Uuid, ExerciseSession>,
    max_idle: Duration,
) -> Vec<SessionSummary> {
    let Some(cutoff) = Utc::now().checked_sub_signed(max_idle) else {
        return Vec::new();
    };

    let expired: Vec<Uuid> = sessions
        .values()
        .filter(|s| s.last_active_at < cutoff)
        .map(|s| s.id)
        .collect();

    expired
        .iter()
        .filter_map(|id| sessions.remove(id))
        .map(|s| s.summary(EndReason::Expired))
        .collect()
}
