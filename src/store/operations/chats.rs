use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Store, StoreError};
use crate::validation;

/// Telegram chat id. Group ids are negative.
pub type ChatId = i64;

/// A group chat the bot has been used in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_id: ChatId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Insert the chat or overwrite its title with the latest one seen.
    pub fn get_or_create_chat(&self, chat_id: ChatId, title: &str) -> Result<Chat, StoreError> {
        let title = validation::normalize_chat_title(title)
            .map_err(|m| StoreError::Validation(m.to_string()))?;
        let now = Utc::now();

        let mut chats = self.chats_write()?;
        let chat = chats
            .entry(chat_id)
            .and_modify(|c| {
                if c.title != title {
                    c.title = title.clone();
                    c.updated_at = now;
                }
            })
            .or_insert_with(|| Chat {
                chat_id,
                title: title.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(chat.clone())
    }

    pub fn get_chat(&self, chat_id: ChatId) -> Result<Option<Chat>, StoreError> {
        Ok(self.chats_read()?.get(&chat_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_follows_latest_call() {
        let store = Store::new();
        let first = store.get_or_create_chat(-100123, "Study group").unwrap();
        let renamed = store.get_or_create_chat(-100123, " Study group 2 ").unwrap();

        assert_eq!(renamed.title, "Study group 2");
        assert_eq!(renamed.created_at, first.created_at);
        assert!(renamed.updated_at >= first.updated_at);
        assert_eq!(store.get_chat(-100123).unwrap().unwrap().title, "Study group 2");
    }

    #[test]
    fn same_title_keeps_timestamp() {
        let store = Store::new();
        let first = store.get_or_create_chat(5, "Club").unwrap();
        let again = store.get_or_create_chat(5, "Club").unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn blank_title_is_rejected() {
        let store = Store::new();
        assert!(matches!(
            store.get_or_create_chat(5, "   "),
            Err(StoreError::Validation(_))
        ));
        assert!(store.get_chat(5).unwrap().is_none());
    }
}
