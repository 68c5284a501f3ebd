use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::DocumentKind;

/// Dispatches to the adapter registered for the document kind.
pub struct CompositeExtractor {
    adapters: HashMap<DocumentKind, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(adapters: Vec<(DocumentKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// The standard production wiring: PDF, Word containers and plain text.
    pub fn with_default_adapters() -> Self {
        let pdf: Arc<dyn TextExtractor> = Arc::new(super::PdfAdapter::new());
        let word: Arc<dyn TextExtractor> = Arc::new(super::WordAdapter::new());
        let text: Arc<dyn TextExtractor> = Arc::new(super::PlainTextAdapter::new());

        Self::new(vec![
            (DocumentKind::Pdf, pdf),
            (DocumentKind::Doc, Arc::clone(&word)),
            (DocumentKind::Docx, word),
            (DocumentKind::Text, text),
        ])
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract_text(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        let adapter = self.adapters.get(&kind).ok_or_else(|| {
            ExtractionError::UnsupportedFileType(kind.as_extension().to_string())
        })?;

        adapter.extract_text(path, kind).await
    }
}
