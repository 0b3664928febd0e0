use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use doorbuster_core::UserId;

/// A site account.
///
/// The password hash never leaves the service; it is skipped during
/// serialization and redacted from debug output.
#[derive(Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password_hash() {
        let user = User {
            id: UserId::from(uuid::Uuid::nil()),
            email: "shopper@example.com".to_owned(),
            password_hash: "$argon2id$v=19$secret".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let rendered = format!("{user:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("argon2id"));
    }
}
