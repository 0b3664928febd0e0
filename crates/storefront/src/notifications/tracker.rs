//! Unread-count tracker with stale-refresh protection.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::db::{NotificationRepository, RepositoryError};

use super::watermark::WatermarkStore;

/// How often the background loop recomputes the unread count.
const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Errors from the unread tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("watermark store error: {0}")]
    Watermark(#[from] io::Error),
}

/// Source of notification publication timestamps.
pub trait NotificationFeed: Send + Sync + 'static {
    /// All publication timestamps, ordering not significant.
    fn published(&self)
    -> impl Future<Output = Result<Vec<DateTime<Utc>>, RepositoryError>> + Send;
}

/// Feed backed by the `notifications` table.
#[derive(Clone)]
pub struct DbNotificationFeed {
    pool: PgPool,
}

impl DbNotificationFeed {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl NotificationFeed for DbNotificationFeed {
    async fn published(&self) -> Result<Vec<DateTime<Utc>>, RepositoryError> {
        NotificationRepository::new(&self.pool).list_published().await
    }
}

struct TrackerInner<F, S> {
    feed: F,
    store: S,
    unread: AtomicUsize,
    generation: AtomicU64,
}

/// Tracks how many notifications were published after the persisted
/// watermark. Clone-cheap; all clones share the same count.
pub struct UnreadTracker<F, S> {
    inner: Arc<TrackerInner<F, S>>,
}

impl<F, S> Clone for UnreadTracker<F, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: NotificationFeed, S: WatermarkStore> UnreadTracker<F, S> {
    #[must_use]
    pub fn new(feed: F, store: S) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                feed,
                store,
                unread: AtomicUsize::new(0),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// The most recently published unread count.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.inner.unread.load(Ordering::Acquire)
    }

    /// Recompute the unread count against the feed.
    ///
    /// The result is discarded if another refresh or a mark-all-read bumped
    /// the generation while this one was in flight.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError` if the watermark cannot be loaded or the
    /// feed query fails.
    pub async fn refresh(&self) -> Result<usize, TrackerError> {
        let token = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let watermark = self.inner.store.load().await?;
        let published = self.inner.feed.published().await?;
        let count = count_unread(&published, watermark);

        if self.inner.generation.load(Ordering::Acquire) == token {
            self.inner.unread.store(count, Ordering::Release);
            debug!(count, "refreshed notification unread count");
        } else {
            debug!(count, "discarding stale unread refresh");
        }

        Ok(count)
    }

    /// Persist "now" as the watermark and zero the count.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Watermark` if the watermark cannot be saved.
    pub async fn mark_all_read(&self) -> Result<(), TrackerError> {
        self.inner.store.save(Utc::now()).await?;
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.unread.store(0, Ordering::Release);
        Ok(())
    }

    /// Spawn the background refresh loop.
    ///
    /// Runs an immediate refresh, then one every [`REFRESH_INTERVAL`].
    /// Failures are logged and the loop keeps going.
    pub fn spawn_refresh_loop(&self) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
            loop {
                ticker.tick().await;
                if let Err(err) = tracker.refresh().await {
                    warn!(error = %err, "notification unread refresh failed");
                }
            }
        })
    }
}

/// Count publications strictly after the watermark. No watermark means
/// nothing has ever been seen, so every publication counts.
#[must_use]
pub fn count_unread(
    published: &[DateTime<Utc>],
    watermark: Option<DateTime<Utc>>,
) -> usize {
    match watermark {
        Some(seen) => published.iter().filter(|ts| **ts > seen).count(),
        None => published.len(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tokio::sync::Notify;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    /// Feed of fixed timestamps, optionally held at a gate until released.
    #[derive(Clone)]
    struct FixedFeed {
        published: Vec<DateTime<Utc>>,
        gate: Option<Arc<Notify>>,
    }

    impl FixedFeed {
        fn immediate(published: Vec<DateTime<Utc>>) -> Self {
            Self {
                published,
                gate: None,
            }
        }

        fn gated(published: Vec<DateTime<Utc>>, gate: Arc<Notify>) -> Self {
            Self {
                published,
                gate: Some(gate),
            }
        }
    }

    impl NotificationFeed for FixedFeed {
        async fn published(&self) -> Result<Vec<DateTime<Utc>>, RepositoryError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(self.published.clone())
        }
    }

    /// In-memory watermark store.
    #[derive(Default)]
    struct MemoryStore {
        watermark: std::sync::Mutex<Option<DateTime<Utc>>>,
    }

    impl WatermarkStore for MemoryStore {
        async fn load(&self) -> io::Result<Option<DateTime<Utc>>> {
            Ok(*self.watermark.lock().expect("lock"))
        }

        async fn save(&self, timestamp: DateTime<Utc>) -> io::Result<()> {
            *self.watermark.lock().expect("lock") = Some(timestamp);
            Ok(())
        }
    }

    #[test]
    fn no_watermark_counts_everything() {
        let published = vec![at(1), at(2), at(3)];
        assert_eq!(count_unread(&published, None), 3);
    }

    #[test]
    fn watermark_excludes_earlier_and_equal() {
        let published = vec![at(1), at(2), at(3)];
        assert_eq!(count_unread(&published, Some(at(2))), 1);
    }

    #[test]
    fn watermark_after_everything_yields_zero() {
        let published = vec![at(1), at(2)];
        assert_eq!(count_unread(&published, Some(at(5))), 0);
    }

    #[test]
    fn empty_feed_is_zero_either_way() {
        assert_eq!(count_unread(&[], None), 0);
        assert_eq!(count_unread(&[], Some(at(1))), 0);
    }

    #[tokio::test]
    async fn refresh_with_no_watermark_counts_the_full_feed() {
        let tracker = UnreadTracker::new(
            FixedFeed::immediate(vec![at(1), at(2), at(3)]),
            MemoryStore::default(),
        );

        let count = tracker.refresh().await.expect("refresh");
        assert_eq!(count, 3);
        assert_eq!(tracker.unread_count(), 3);
    }

    #[tokio::test]
    async fn refresh_after_mark_all_read_returns_zero() {
        let tracker = UnreadTracker::new(
            FixedFeed::immediate(vec![at(1), at(2), at(3)]),
            MemoryStore::default(),
        );

        tracker.refresh().await.expect("refresh");
        assert_eq!(tracker.unread_count(), 3);

        tracker.mark_all_read().await.expect("mark");
        assert_eq!(tracker.unread_count(), 0);

        // No new publications since the mark, so another refresh stays 0
        let count = tracker.refresh().await.expect("refresh");
        assert_eq!(count, 0);
        assert_eq!(tracker.unread_count(), 0);
    }

    #[tokio::test]
    async fn a_refresh_finishing_after_mark_all_read_is_discarded() {
        let gate = Arc::new(Notify::new());
        let tracker = UnreadTracker::new(
            FixedFeed::gated(vec![at(1), at(2), at(3)], Arc::clone(&gate)),
            MemoryStore::default(),
        );

        // Start a refresh and hold it at the feed query
        let in_flight = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.refresh().await })
        };
        tokio::task::yield_now().await;

        // Everything is marked read while the old refresh is still pending
        tracker.mark_all_read().await.expect("mark");
        assert_eq!(tracker.unread_count(), 0);

        // Release the stale refresh. It computed against the pre-mark
        // watermark, so its count is 3 - but it must not be applied.
        gate.notify_one();
        let stale_count = in_flight
            .await
            .expect("join")
            .expect("refresh");
        assert_eq!(stale_count, 3);
        assert_eq!(tracker.unread_count(), 0);
    }

    #[tokio::test]
    async fn a_newer_refresh_wins_over_an_older_one() {
        let gate = Arc::new(Notify::new());
        let tracker = UnreadTracker::new(
            FixedFeed::gated(vec![at(1), at(2)], Arc::clone(&gate)),
            MemoryStore::default(),
        );

        let first = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.refresh().await })
        };
        tokio::task::yield_now().await;

        let second = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.refresh().await })
        };
        tokio::task::yield_now().await;

        // Release both; each waiter needs its own permit
        gate.notify_one();
        gate.notify_one();

        first.await.expect("join").expect("refresh");
        second.await.expect("join").expect("refresh");

        // The newer refresh's count stands, the older one was discarded
        assert_eq!(tracker.unread_count(), 2);
    }
}
