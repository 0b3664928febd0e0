//! Notification repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use doorbuster_core::{NewNotification, Notification, NotificationId};

use super::RepositoryError;

const NOTIFICATION_COLUMNS: &str =
    "id, type, title, message, preview, published_at, expires_at, created_at, updated_at";

/// Repository for notification records.
pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_ordered(&self) -> Result<Vec<Notification>, RepositoryError> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY published_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    /// List only publication timestamps, newest first.
    ///
    /// This is the narrow projection the unread tracker polls every
    /// refresh; it avoids shipping message bodies around.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<DateTime<Utc>>, RepositoryError> {
        let published = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT published_at FROM notifications ORDER BY published_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(published)
    }

    /// Get a notification by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(notification)
    }

    /// Insert a notification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, input: &NewNotification) -> Result<Notification, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (type, title, message, preview, published_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(input.kind)
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.preview)
        .bind(input.published_at)
        .bind(input.expires_at)
        .fetch_one(self.pool)
        .await?;

        Ok(notification)
    }

    /// Replace a notification's fields. Returns `None` when no such row
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: NotificationId,
        input: &NewNotification,
    ) -> Result<Option<Notification>, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET type = $2, title = $3, message = $4, preview = $5, \
                 published_at = $6, expires_at = $7, updated_at = now() \
             WHERE id = $1 \
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(input.kind)
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.preview)
        .bind(input.published_at)
        .bind(input.expires_at)
        .fetch_optional(self.pool)
        .await?;

        Ok(notification)
    }

    /// Delete a notification. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: NotificationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
