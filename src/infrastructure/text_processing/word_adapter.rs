use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use zip::ZipArchive;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::DocumentKind;

use super::text_sanitizer::sanitize_extracted_text;

static XML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Extracts text from OOXML word-processor containers (.docx). Legacy .doc
/// files are routed here too; those that are not zip containers fail the
/// archive parse and surface as an extraction failure like any other decoder
/// error.
#[derive(Default)]
pub struct WordAdapter;

impl WordAdapter {
    pub fn new() -> Self {
        Self
    }

    fn document_xml(bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("not a word-processor container: {e}"))
        })?;

        let mut entry = archive.by_name("word/document.xml").map_err(|e| {
            ExtractionError::ExtractionFailed(format!("container has no document body: {e}"))
        })?;

        let mut xml = String::new();
        entry.read_to_string(&mut xml).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to read document body: {e}"))
        })?;

        Ok(xml)
    }

    fn strip_markup(xml: &str) -> String {
        // Paragraph closers become line breaks before tags are dropped, so
        // paragraph boundaries survive into the plain text.
        let with_breaks = xml.replace("</w:p>", "\n");
        let text = XML_TAG.replace_all(&with_breaks, "");

        // `&amp;` decodes last so sequences like `&amp;lt;` stay literal.
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }
}

#[async_trait]
impl TextExtractor for WordAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_text(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        if kind != DocumentKind::Doc && kind != DocumentKind::Docx {
            return Err(ExtractionError::UnsupportedFileType(
                kind.as_extension().to_string(),
            ));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to read staged file: {e}"))
        })?;

        let xml = tokio::task::spawn_blocking(move || Self::document_xml(&bytes))
            .await
            .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = sanitize_extracted_text(&Self::strip_markup(&xml));
        if text.is_empty() {
            return Err(ExtractionError::NoTextFound(path.display().to_string()));
        }

        tracing::info!(characters = text.chars().count(), "Word text extraction complete");
        Ok(text)
    }
}
