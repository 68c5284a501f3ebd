mod llm_client;
mod staging;
mod text_extractor;
mod user_data_repository;

pub use llm_client::{LlmClient, LlmClientError, LlmTokenStream, SpeechAudio};
pub use staging::{DocumentStaging, StagedFile, StagingError};
pub use text_extractor::{ExtractionError, TextExtractor};
pub use user_data_repository::{RepositoryError, SaveOutcome, UserDataRepository};
