use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use lexguard::application::ports::{DocumentStaging, ExtractionError, TextExtractor};
use lexguard::application::services::{
    AccountPolicy, AnalysisError, AnalysisInput, AnalysisLimits, AnalysisService, AnalysisSource,
};
use lexguard::infrastructure::llm::MockLlmClient;
use lexguard::infrastructure::persistence::MockUserDataRepository;
use lexguard::infrastructure::storage::TempStore;
use lexguard::infrastructure::text_processing::MockExtractor;

const CONTRACT_TEXT: &str = "This Consulting Agreement is made between the consultant and \
the company. The consultant will provide the services described in the statement of work, \
and the company will pay the agreed fees within thirty days of each invoice. Either party \
may terminate for material breach after fifteen days of written notice and an opportunity \
to cure.";

struct FailingExtractor;

#[async_trait]
impl TextExtractor for FailingExtractor {
    async fn extract_text(
        &self,
        _path: &Path,
        _kind: lexguard::domain::DocumentKind,
    ) -> Result<String, ExtractionError> {
        Err(ExtractionError::ExtractionFailed(
            "decoder blew up".to_string(),
        ))
    }
}

fn staged_file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

fn service_with<E: TextExtractor>(
    extractor: E,
    store: Arc<TempStore>,
) -> AnalysisService<E, MockLlmClient> {
    AnalysisService::new(
        Arc::new(extractor),
        Arc::new(MockLlmClient::default()),
        Arc::new(MockUserDataRepository::new()),
        store as Arc<dyn DocumentStaging>,
        AnalysisLimits::default(),
        AccountPolicy::default(),
    )
}

fn file_input(filename: &str, content: &str) -> AnalysisInput {
    AnalysisInput {
        source: AnalysisSource::File {
            filename: filename.to_string(),
            bytes: content.as_bytes().to_vec(),
        },
        parties: None,
        email: None,
    }
}

#[tokio::test]
async fn given_successful_file_analysis_when_service_returns_then_staging_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(TempStore::new(dir.path().to_path_buf()).unwrap());
    let service = service_with(MockExtractor, Arc::clone(&store));

    let outcome = service
        .analyze(file_input("contract.txt", CONTRACT_TEXT))
        .await
        .unwrap();

    assert_eq!(outcome.original_text, CONTRACT_TEXT);
    assert_eq!(outcome.metadata.source, "file");
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_failing_extractor_when_service_errors_then_staging_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(TempStore::new(dir.path().to_path_buf()).unwrap());
    let service = service_with(FailingExtractor, Arc::clone(&store));

    let result = service
        .analyze(file_input("contract.pdf", CONTRACT_TEXT))
        .await;

    assert!(matches!(result, Err(AnalysisError::Extraction(_))));
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_short_extracted_text_when_service_errors_then_staging_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(TempStore::new(dir.path().to_path_buf()).unwrap());
    let service = service_with(MockExtractor, Arc::clone(&store));

    let result = service.analyze(file_input("note.txt", "Too short.")).await;

    assert!(matches!(
        result,
        Err(AnalysisError::ContentTooShort { .. })
    ));
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_inline_text_when_analyzing_then_no_file_is_ever_staged() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(TempStore::new(dir.path().to_path_buf()).unwrap());
    let service = service_with(MockExtractor, Arc::clone(&store));

    let outcome = service
        .analyze(AnalysisInput {
            source: AnalysisSource::Text(CONTRACT_TEXT.to_string()),
            parties: None,
            email: None,
        })
        .await
        .unwrap();

    assert_eq!(outcome.metadata.source, "text");
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_unsupported_extension_when_analyzing_then_fails_without_staging() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(TempStore::new(dir.path().to_path_buf()).unwrap());
    let service = service_with(MockExtractor, Arc::clone(&store));

    let result = service
        .analyze(file_input("malware.exe", CONTRACT_TEXT))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::UnsupportedFileType(_))
    ));
    assert_eq!(staged_file_count(dir.path()), 0);
}
