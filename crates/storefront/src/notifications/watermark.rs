//! Persistence for the notification "last seen" watermark.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Storage for the last-seen watermark timestamp.
pub trait WatermarkStore: Send + Sync + 'static {
    /// Load the persisted watermark, if any.
    fn load(&self) -> impl Future<Output = io::Result<Option<DateTime<Utc>>>> + Send;

    /// Persist a new watermark.
    fn save(&self, timestamp: DateTime<Utc>) -> impl Future<Output = io::Result<()>> + Send;
}

/// Watermark persisted as an RFC 3339 string in a single file.
///
/// A missing file means no watermark has been recorded yet; an unparsable
/// file is treated the same way after logging a warning, so a corrupted
/// watermark degrades to "everything unread" rather than an error.
#[derive(Clone, Debug)]
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl WatermarkStore for FileWatermarkStore {
    async fn load(&self) -> io::Result<Option<DateTime<Utc>>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(parsed) => Ok(Some(parsed.with_timezone(&Utc))),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unparsable notification watermark");
                Ok(None)
            }
        }
    }

    async fn save(&self, timestamp: DateTime<Utc>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, timestamp.to_rfc3339()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("doorbuster-watermark-{name}-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_is_no_watermark() {
        let store = FileWatermarkStore::new(scratch_path("missing"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn round_trips_a_timestamp() {
        let path = scratch_path("roundtrip");
        let store = FileWatermarkStore::new(path.clone());

        let ts = Utc::now();
        store.save(ts).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.timestamp_millis(), ts.timestamp_millis());

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn corrupt_contents_degrade_to_none() {
        let path = scratch_path("corrupt");
        tokio::fs::write(&path, "not a timestamp").await.unwrap();

        let store = FileWatermarkStore::new(path.clone());
        assert_eq!(store.load().await.unwrap(), None);

        let _ = tokio::fs::remove_file(path).await;
    }
}
