pub mod operations;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::scheduler::WordId;
use operations::chats::{Chat, ChatId};
use operations::sentences::SentenceLogEntry;
use operations::users::{User, UserId};
use operations::vocabularies::{Vocabulary, VocabularyId};
use operations::words::Word;

/// Process-local word store.
///
/// Each table sits behind its own lock. Methods that touch several tables
/// always lock in declaration order (users, chats, vocabularies, words,
/// sentences).
#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<BTreeMap<UserId, User>>,
    chats: RwLock<BTreeMap<ChatId, Chat>>,
    vocabularies: RwLock<BTreeMap<VocabularyId, Vocabulary>>,
    words: RwLock<BTreeMap<WordId, Word>>,
    sentences: RwLock<Vec<SentenceLogEntry>>,
    vocabulary_seq: AtomicU64,
    word_seq: AtomicU64,
    sentence_seq: AtomicU64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: entity={entity}, key={key}")]
    NotFound { entity: String, key: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("lock poisoned: table={0}")]
    Poisoned(&'static str),
}

impl StoreError {
    pub(crate) fn not_found(entity: &str, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_vocabulary_id(&self) -> VocabularyId {
        self.vocabulary_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn next_word_id(&self) -> WordId {
        self.word_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn next_sentence_id(&self) -> u64 {
        self.sentence_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn users_read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.users.read().map_err(|_| StoreError::Poisoned("users"))
    }

    pub(crate) fn users_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.users.write().map_err(|_| StoreError::Poisoned("users"))
    }

    pub(crate) fn chats_read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<ChatId, Chat>>, StoreError> {
        self.chats.read().map_err(|_| StoreError::Poisoned("chats"))
    }

    pub(crate) fn chats_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<ChatId, Chat>>, StoreError> {
        self.chats.write().map_err(|_| StoreError::Poisoned("chats"))
    }

    pub(crate) fn vocabularies_read(
        &self,
    ) -> Result<RwLockReadGuard<'_, BTreeMap<VocabularyId, Vocabulary>>, StoreError> {
        self.vocabularies
            .read()
            .map_err(|_| StoreError::Poisoned("vocabularies"))
    }

    pub(crate) fn vocabularies_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<VocabularyId, Vocabulary>>, StoreError> {
        self.vocabularies
            .write()
            .map_err(|_| StoreError::Poisoned("vocabularies"))
    }

    pub(crate) fn words_read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<WordId, Word>>, StoreError> {
        self.words.read().map_err(|_| StoreError::Poisoned("words"))
    }

    pub(crate) fn words_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<WordId, Word>>, StoreError> {
        self.words.write().map_err(|_| StoreError::Poisoned("words"))
    }

    pub(crate) fn sentences_read(
        &self,
    ) -> Result<RwLockReadGuard<'_, Vec<SentenceLogEntry>>, StoreError> {
        self.sentences
            .read()
            .map_err(|_| StoreError::Poisoned("sentences"))
    }

    pub(crate) fn sentences_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Vec<SentenceLogEntry>>, StoreError> {
        self.sentences
            .write()
            .map_err(|_| StoreError::Poisoned("sentences"))
    }

    /// Cheap liveness probe used by the readiness endpoint.
    pub fn is_healthy(&self) -> bool {
        self.users_read().is_ok()
            && self.chats_read().is_ok()
            && self.vocabularies_read().is_ok()
            && self.words_read().is_ok()
            && self.sentences_read().is_ok()
    }
}
