//! Notification feed and unread badge handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use doorbuster_core::Notification;

use crate::db::NotificationRepository;
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
}

/// `GET /notifications`
///
/// Returns live notifications, newest first, and marks everything read:
/// opening the list is what clears the badge.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<NotificationList>> {
    let now = Utc::now();
    let notifications = NotificationRepository::new(state.pool())
        .list_ordered()
        .await?
        .into_iter()
        .filter(|n| n.is_live(now))
        .collect();

    state.tracker().mark_all_read().await?;

    Ok(Json(NotificationList { notifications }))
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

/// `GET /notifications/unread`
#[instrument(skip(state))]
pub async fn unread(State(state): State<AppState>) -> Json<UnreadCount> {
    Json(UnreadCount {
        count: state.tracker().unread_count(),
    })
}

/// `POST /notifications/read`
#[instrument(skip(state))]
pub async fn mark_read(State(state): State<AppState>) -> Result<Json<UnreadCount>> {
    state.tracker().mark_all_read().await?;
    Ok(Json(UnreadCount { count: 0 }))
}
