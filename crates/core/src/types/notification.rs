//! In-app notification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NotificationId;

/// Category of a notification, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "notification_type", rename_all = "snake_case")
)]
pub enum NotificationType {
    Event,
    Announcement,
    #[default]
    General,
}

/// A polled in-app notification.
///
/// Notifications are published by admins and polled by clients; there is no
/// push delivery. "Unread" is not stored per notification - it is derived
/// from a single client-side watermark timestamp compared against
/// `published_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "type"))]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    /// Short teaser shown in list rows.
    pub preview: String,
    pub published_at: DateTime<Utc>,
    /// Past this instant the notification is hidden from lists.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the notification should still be shown at `now`.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires| now <= expires)
    }
}

/// Input for creating or replacing a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub preview: String,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn notification(expires_at: Option<DateTime<Utc>>) -> Notification {
        let now = Utc::now();
        Notification {
            id: NotificationId::generate(),
            kind: NotificationType::Event,
            title: "Doors open early".to_string(),
            message: "Saturday opening moved to 8am".to_string(),
            preview: "Saturday opening moved".to_string(),
            published_at: now - Duration::hours(1),
            expires_at,
            created_at: now - Duration::hours(1),
            updated_at: now - Duration::hours(1),
        }
    }

    #[test]
    fn no_expiry_is_always_live() {
        assert!(notification(None).is_live(Utc::now()));
    }

    #[test]
    fn past_expiry_is_not_live() {
        let n = notification(Some(Utc::now() - Duration::minutes(5)));
        assert!(!n.is_live(Utc::now()));
    }

    #[test]
    fn type_field_round_trips_as_type() {
        let n = notification(None);
        let json = serde_json::to_value(&n).expect("serialize");
        assert_eq!(json["type"], "event");
    }
}
