//! In-app notification unread tracking.
//!
//! The storefront shows a badge with the number of notifications published
//! since the user last opened the notification list. The "last seen" instant
//! is a single watermark timestamp persisted through a [`WatermarkStore`];
//! the unread count is recomputed against the `notifications` table on a
//! fixed cadence and whenever the list is opened.
//!
//! Refreshes are guarded by a generation token: every refresh captures the
//! current generation before touching the database and only publishes its
//! count if no newer refresh or mark-all-read has bumped the generation in
//! the meantime. A stale in-flight query can therefore never clobber a
//! fresher count.

pub mod tracker;
pub mod watermark;

pub use tracker::{DbNotificationFeed, NotificationFeed, TrackerError, UnreadTracker};
pub use watermark::{FileWatermarkStore, WatermarkStore};
