use std::io::Write;
use std::sync::Arc;

use lexguard::application::ports::{ExtractionError, TextExtractor};
use lexguard::domain::DocumentKind;
use lexguard::infrastructure::text_processing::{
    sanitize_extracted_text, CompositeExtractor, PlainTextAdapter, WordAdapter,
};

fn write_temp(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn minimal_docx(paragraphs: &[&str]) -> Vec<u8> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default();

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\"?><w:document xmlns:w=\"w\"><w:body>{}</w:body></w:document>",
        body
    );

    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn given_utf8_file_when_extracting_plain_text_then_returns_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "contract.txt", "The parties agree as follows.".as_bytes());

    let adapter = PlainTextAdapter::new();
    let text = adapter
        .extract_text(&path, DocumentKind::Text)
        .await
        .unwrap();

    assert_eq!(text, "The parties agree as follows.");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_plain_text_then_returns_extraction_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "contract.txt", &[0xff, 0xfe, 0x00]);

    let adapter = PlainTextAdapter::new();
    let result = adapter.extract_text(&path, DocumentKind::Text).await;

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_wrong_kind_when_extracting_plain_text_then_returns_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "contract.pdf", b"whatever");

    let adapter = PlainTextAdapter::new();
    let result = adapter.extract_text(&path, DocumentKind::Pdf).await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedFileType(_))
    ));
}

#[tokio::test]
async fn given_docx_container_when_extracting_then_paragraphs_become_text() {
    let dir = tempfile::tempdir().unwrap();
    let docx = minimal_docx(&["First paragraph.", "Second paragraph."]);
    let path = write_temp(&dir, "contract.docx", &docx);

    let adapter = WordAdapter::new();
    let text = adapter
        .extract_text(&path, DocumentKind::Docx)
        .await
        .unwrap();

    assert!(text.contains("First paragraph."));
    assert!(text.contains("Second paragraph."));
}

#[tokio::test]
async fn given_docx_with_entities_when_extracting_then_entities_are_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let docx = minimal_docx(&["Smith &amp; Sons &lt;holdings&gt;"]);
    let path = write_temp(&dir, "contract.docx", &docx);

    let adapter = WordAdapter::new();
    let text = adapter
        .extract_text(&path, DocumentKind::Docx)
        .await
        .unwrap();

    assert!(text.contains("Smith & Sons <holdings>"));
}

#[tokio::test]
async fn given_legacy_binary_doc_when_extracting_then_returns_extraction_failed() {
    let dir = tempfile::tempdir().unwrap();
    // Legacy .doc files are OLE blobs, not zip containers.
    let path = write_temp(&dir, "contract.doc", &[0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1]);

    let adapter = WordAdapter::new();
    let result = adapter.extract_text(&path, DocumentKind::Doc).await;

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_corrupt_pdf_when_extracting_via_composite_then_returns_extraction_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "contract.pdf", b"not a pdf at all");

    let extractor = CompositeExtractor::with_default_adapters();
    let result = extractor.extract_text(&path, DocumentKind::Pdf).await;

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_composite_without_adapter_when_extracting_then_returns_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "contract.txt", b"text");

    let text_only: Arc<dyn TextExtractor> = Arc::new(PlainTextAdapter::new());
    let extractor = CompositeExtractor::new(vec![(DocumentKind::Text, text_only)]);
    let result = extractor.extract_text(&path, DocumentKind::Pdf).await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedFileType(_))
    ));
}

#[test]
fn given_messy_decoder_output_when_sanitizing_then_whitespace_is_normalized() {
    let raw = "The   ten-\nant shall\n\n\n\npay   rent.";

    let clean = sanitize_extracted_text(raw);

    assert_eq!(clean, "The tenant shall\n\npay rent.");
}

#[test]
fn given_control_characters_when_sanitizing_then_they_are_removed() {
    let raw = "Rent\u{0000} is\u{0007} due.";

    let clean = sanitize_extracted_text(raw);

    assert_eq!(clean, "Rent is due.");
}
