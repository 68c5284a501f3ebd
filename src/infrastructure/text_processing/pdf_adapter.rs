use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::DocumentKind;

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(path: &PathBuf) -> Result<String, ExtractionError> {
        pdf_extract::extract_text(path)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("failed to parse PDF: {e}")))
    }
}

#[async_trait]
impl TextExtractor for PdfAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_text(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        if kind != DocumentKind::Pdf {
            return Err(ExtractionError::UnsupportedFileType(
                kind.as_extension().to_string(),
            ));
        }

        let owned_path = path.to_path_buf();
        let raw = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_blocking(&owned_path)),
        )
        .await
        .map_err(|_| ExtractionError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = sanitize_extracted_text(&raw);
        if text.is_empty() {
            return Err(ExtractionError::NoTextFound(path.display().to_string()));
        }

        tracing::info!(characters = text.chars().count(), "PDF text extraction complete");
        Ok(text)
    }
}
