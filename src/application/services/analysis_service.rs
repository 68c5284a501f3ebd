use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{
    DocumentStaging, ExtractionError, LlmClient, LlmClientError, StagingError, TextExtractor,
    UserDataRepository,
};
use crate::application::services::{build_analysis_prompt, normalize};
use crate::domain::{Analysis, DocumentKind, Parties};

/// Character bounds enforced before any provider call is made.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisLimits {
    pub min_document_chars: usize,
    pub max_document_chars: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            min_document_chars: 100,
            max_document_chars: 100_000,
        }
    }
}

/// Account integration flags. Lookup is advisory unless `enforce` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountPolicy {
    pub enabled: bool,
    pub enforce: bool,
}

#[derive(Debug)]
pub enum AnalysisSource {
    File { filename: String, bytes: Vec<u8> },
    Text(String),
}

#[derive(Debug)]
pub struct AnalysisInput {
    pub source: AnalysisSource,
    pub parties: Option<Parties>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub analysis_id: String,
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub source: String,
    pub characters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub recognized: bool,
    pub records: usize,
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub original_text: String,
    pub metadata: RequestMetadata,
    pub user_info: Option<UserInfo>,
}

pub struct AnalysisService<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    extractor: Arc<E>,
    llm_client: Arc<L>,
    user_data: Arc<dyn UserDataRepository>,
    staging: Arc<dyn DocumentStaging>,
    limits: AnalysisLimits,
    accounts: AccountPolicy,
}

impl<E, L> AnalysisService<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    pub fn new(
        extractor: Arc<E>,
        llm_client: Arc<L>,
        user_data: Arc<dyn UserDataRepository>,
        staging: Arc<dyn DocumentStaging>,
        limits: AnalysisLimits,
        accounts: AccountPolicy,
    ) -> Self {
        Self {
            extractor,
            llm_client,
            user_data,
            staging,
            limits,
            accounts,
        }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn analyze(&self, input: AnalysisInput) -> Result<AnalysisOutcome, AnalysisError> {
        if !self.llm_client.is_configured() {
            return Err(AnalysisError::ProviderNotConfigured);
        }

        let (text, source, filename) = match input.source {
            AnalysisSource::Text(text) => (text, "text", None),
            AnalysisSource::File { filename, bytes } => {
                let text = self.extract_from_upload(&filename, &bytes).await?;
                (text, "file", Some(filename))
            }
        };

        let characters = text.chars().count();
        if characters < self.limits.min_document_chars {
            return Err(AnalysisError::ContentTooShort {
                actual: characters,
                minimum: self.limits.min_document_chars,
            });
        }
        if characters > self.limits.max_document_chars {
            return Err(AnalysisError::ContentTooLong {
                actual: characters,
                maximum: self.limits.max_document_chars,
            });
        }

        // Account lookup waits until the document has passed validation, so
        // a rejected upload never costs a store round-trip.
        let user_info = self.resolve_account(input.email.as_deref()).await?;

        let prompt = build_analysis_prompt(&text, input.parties.as_ref());
        let raw = self.llm_client.complete(&prompt).await?;

        let analysis = normalize(
            &raw,
            input.parties.as_ref(),
            &text,
            self.llm_client.model_name(),
        );

        let metadata = RequestMetadata {
            analysis_id: analysis.metadata.analysis_id.clone(),
            generated_at: Utc::now(),
            model: self.llm_client.model_name().to_string(),
            source: source.to_string(),
            characters,
            filename,
        };

        tracing::info!(
            analysis_id = %metadata.analysis_id,
            source = %metadata.source,
            characters,
            "Document analysis complete"
        );

        Ok(AnalysisOutcome {
            analysis,
            original_text: text,
            metadata,
            user_info,
        })
    }

    /// Stage the upload under a unique name, run the extractor, and let the
    /// staging guard delete the file whichever way this function exits.
    async fn extract_from_upload(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, AnalysisError> {
        let kind = DocumentKind::from_filename(filename).ok_or_else(|| {
            AnalysisError::UnsupportedFileType(
                filename
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_string())
                    .unwrap_or_else(|| filename.to_string()),
            )
        })?;

        let staged = self.staging.stage(bytes, kind.as_extension()).await?;
        let text = self.extractor.extract_text(staged.path(), kind).await?;
        Ok(text)
    }

    async fn resolve_account(
        &self,
        email: Option<&str>,
    ) -> Result<Option<UserInfo>, AnalysisError> {
        if !self.accounts.enabled {
            return Ok(None);
        }

        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(AnalysisError::MissingEmail)?;

        let records = match self.user_data.find_by_email(email).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Account lookup failed, continuing unauthenticated");
                Vec::new()
            }
        };

        let info = UserInfo {
            email: email.to_string(),
            recognized: !records.is_empty(),
            records: records.len(),
        };

        if self.accounts.enforce && !info.recognized {
            return Err(AnalysisError::UnknownAccount(email.to_string()));
        }

        Ok(Some(info))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("either a document file or text content is required")]
    MissingInput,
    #[error("document content is too short for analysis: {actual} characters (minimum {minimum})")]
    ContentTooShort { actual: usize, minimum: usize },
    #[error("document content is too long for analysis: {actual} characters (maximum {maximum})")]
    ContentTooLong { actual: usize, maximum: usize },
    #[error("email is required")]
    MissingEmail,
    #[error("no stored records found for {0}")]
    UnknownAccount(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("analysis provider is not configured")]
    ProviderNotConfigured,
    #[error("staging: {0}")]
    Staging(#[from] StagingError),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("provider call failed: {0}")]
    Provider(#[from] LlmClientError),
}
