use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Store, StoreError};

/// Telegram user id.
pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display name from Telegram's first and optional last name.
pub fn build_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(last) => format!("{} {}", first_name.trim(), last),
        None => first_name.trim().to_string(),
    }
}

impl Store {
    /// Insert the user or refresh the stored name.
    pub fn get_or_create_user(&self, user_id: UserId, name: &str) -> Result<User, StoreError> {
        let now = Utc::now();
        let mut users = self.users_write()?;
        let user = users
            .entry(user_id)
            .and_modify(|u| {
                if u.name != name {
                    u.name = name.to_string();
                    u.updated_at = now;
                }
            })
            .or_insert_with(|| User {
                user_id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(user.clone())
    }

    pub fn get_user(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users_read()?.get(&user_id).cloned())
    }
}
