use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{DocumentStaging, StagedFile, StagingError};

/// Filesystem staging area for uploads. Filenames are uuid-unique so
/// concurrent requests never collide; the per-request guard deletes each
/// file once, and [`spawn_sweeper`] clears anything a crashed request left
/// behind.
pub struct TempStore {
    dir: PathBuf,
}

impl TempStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StagingError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Remove every staged file whose modification time exceeds `max_age`.
    /// Files deleted concurrently by a finishing request are skipped
    /// silently.
    pub async fn sweep(&self, max_age: Duration) -> Result<usize, StagingError> {
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }

            let expired = metadata
                .modified()
                .ok()
                .and_then(|mtime| mtime.elapsed().ok())
                .map(|age| age > max_age)
                .unwrap_or(false);

            if expired {
                match tokio::fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        tracing::warn!(path = %entry.path().display(), error = %e, "Sweep failed to remove file");
                    }
                }
            }
        }

        if removed > 0 {
            tracing::info!(removed, "Removed stale staged files");
        }
        Ok(removed)
    }
}

#[async_trait]
impl DocumentStaging for TempStore {
    async fn stage(&self, bytes: &[u8], extension: &str) -> Result<StagedFile, StagingError> {
        let path = self.dir.join(format!("{}.{}", Uuid::new_v4(), extension));
        tokio::fs::write(&path, bytes).await?;
        Ok(StagedFile::new(path))
    }
}

/// Background safety net behind the per-request guards. Runs forever;
/// errors are logged and the next tick tries again.
pub fn spawn_sweeper(
    store: Arc<TempStore>,
    interval: Duration,
    max_age: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = store.sweep(max_age).await {
                tracing::warn!(error = %e, "Staged file sweep failed");
            }
        }
    })
}
