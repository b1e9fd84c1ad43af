use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::operations::users::UserId;
use crate::store::{Store, StoreError};
use crate::validation;

pub type VocabularyId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub owner_id: UserId,
    pub name: String,
    pub goal_language: String,
    pub native_language: String,
    pub goal_code: String,
    pub native_code: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabulary {
    pub name: String,
    pub goal_language: String,
    pub native_language: String,
    pub goal_code: String,
    pub native_code: String,
    #[serde(default)]
    pub level: String,
}

impl Store {
    pub fn create_vocabulary(
        &self,
        owner_id: UserId,
        input: &NewVocabulary,
    ) -> Result<Vocabulary, StoreError> {
        let name = validation::normalize_name(&input.name)
            .map_err(|m| StoreError::Validation(m.to_string()))?;

        let vocabulary = Vocabulary {
            id: self.next_vocabulary_id(),
            owner_id,
            name,
            goal_language: input.goal_language.trim().to_string(),
            native_language: input.native_language.trim().to_string(),
            goal_code: input.goal_code.trim().to_lowercase(),
            native_code: input.native_code.trim().to_lowercase(),
            level: input.level.trim().to_string(),
            created_at: Utc::now(),
        };

        self.vocabularies_write()?
            .insert(vocabulary.id, vocabulary.clone());
        tracing::debug!(vocabulary_id = vocabulary.id, owner_id, "Vocabulary created");
        Ok(vocabulary)
    }

    pub fn get_vocabulary(&self, vocabulary_id: VocabularyId) -> Result<Option<Vocabulary>, StoreError> {
        Ok(self.vocabularies_read()?.get(&vocabulary_id).cloned())
    }

    /// The vocabulary if it exists and belongs to `owner_id`.
    pub fn get_owned_vocabulary(
        &self,
        owner_id: UserId,
        vocabulary_id: VocabularyId,
    ) -> Result<Vocabulary, StoreError> {
        self.get_vocabulary(vocabulary_id)?
            .filter(|v| v.owner_id == owner_id)
            .ok_or_else(|| StoreError::not_found("vocabulary", vocabulary_id))
    }

    pub fn list_vocabularies(&self, owner_id: UserId) -> Result<Vec<Vocabulary>, StoreError> {
        Ok(self
            .vocabularies_read()?
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect())
    }

    pub fn rename_vocabulary(
        &self,
        owner_id: UserId,
        vocabulary_id: VocabularyId,
        name: &str,
    ) -> Result<Vocabulary, StoreError> {
        let name =
            validation::normalize_name(name).map_err(|m| StoreError::Validation(m.to_string()))?;

        let mut vocabularies = self.vocabularies_write()?;
        let vocabulary = vocabularies
            .get_mut(&vocabulary_id)
            .filter(|v| v.owner_id == owner_id)
            .ok_or_else(|| StoreError::not_found("vocabulary", vocabulary_id))?;
        vocabulary.name = name;
        Ok(vocabulary.clone())
    }

    /// Delete the vocabulary together with its words and logged sentences.
    pub fn delete_vocabulary(
        &self,
        owner_id: UserId,
        vocabulary_id: VocabularyId,
    ) -> Result<(), StoreError> {
        let mut vocabularies = self.vocabularies_write()?;
        match vocabularies.get(&vocabulary_id) {
            Some(v) if v.owner_id == owner_id => {}
            _ => return Err(StoreError::not_found("vocabulary", vocabulary_id)),
        }

        let mut words = self.words_write()?;
        let mut sentences = self.sentences_write()?;

        vocabularies.remove(&vocabulary_id);
        let before = words.len();
        words.retain(|_, w| w.vocabulary_id != vocabulary_id);
        sentences.retain(|s| s.vocabulary_id != vocabulary_id);

        tracing::info!(
            vocabulary_id,
            owner_id,
            words_removed = before - words.len(),
            "Vocabulary deleted"
        );
        Ok(())
    }
}
