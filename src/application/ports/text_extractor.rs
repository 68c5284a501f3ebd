use std::path::Path;

use async_trait::async_trait;

use crate::domain::DocumentKind;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Produce plain text from a staged file of the declared kind.
    async fn extract_text(&self, path: &Path, kind: DocumentKind)
        -> Result<String, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
