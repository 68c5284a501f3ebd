use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait DocumentStaging: Send + Sync {
    /// Write uploaded bytes to a uniquely named file carrying the original
    /// extension. The returned guard deletes the file when dropped.
    async fn stage(&self, bytes: &[u8], extension: &str) -> Result<StagedFile, StagingError>;
}

/// RAII handle for a staged upload. Deletion runs on every exit path,
/// including panics and early returns; a file already removed by the
/// background sweep is not an error.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove staged file");
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("staging failed: {0}")]
    Io(#[from] std::io::Error),
}
