use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Authentication identity. Never serialized to clients directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Per-user metadata, created alongside the account at signup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Name shown next to a user's entries in admin listings.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.email.as_deref().filter(|e| !e.is_empty()))
            .unwrap_or("Unnamed User")
    }
}

#[cfg(test)]
pub fn sample_profile(user_id: Uuid, is_admin: bool) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        user_id,
        username: None,
        full_name: None,
        email: None,
        is_admin,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
