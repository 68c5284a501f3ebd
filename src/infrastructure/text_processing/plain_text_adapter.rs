use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::DocumentKind;

#[derive(Default)]
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PlainTextAdapter {
    async fn extract_text(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        if kind != DocumentKind::Text {
            return Err(ExtractionError::UnsupportedFileType(
                kind.as_extension().to_string(),
            ));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to read staged file: {e}"))
        })?;

        String::from_utf8(bytes).map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))
    }
}
