use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::DocumentKind;

/// Reads the staged file as UTF-8 regardless of kind.
pub struct MockExtractor;

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract_text(
        &self,
        path: &Path,
        _kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))
    }
}
