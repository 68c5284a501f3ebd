use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::application::ports::{LlmClient, LlmClientError, LlmTokenStream};
use crate::application::services::build_question_prompt;
use crate::domain::ConversationTurn;

#[derive(Debug)]
pub struct QuestionRequest {
    pub question: String,
    pub context: Value,
    pub history: Vec<ConversationTurn>,
    pub original_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerMetadata {
    pub answer_id: String,
    pub generated_at: DateTime<Utc>,
    pub model: String,
}

impl AnswerMetadata {
    fn new(model: &str) -> Self {
        Self {
            answer_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Answer {
    pub text: String,
    pub metadata: AnswerMetadata,
}

/// Streaming answer: token increments plus the metadata the final event
/// will carry.
pub struct AnswerStream {
    pub tokens: LlmTokenStream,
    pub metadata: AnswerMetadata,
}

pub struct QuestionService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> QuestionService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn answer(&self, request: QuestionRequest) -> Result<Answer, QuestionError> {
        let prompt = self.validated_prompt(&request)?;

        let text = self.llm_client.complete(&prompt).await?;

        Ok(Answer {
            text,
            metadata: AnswerMetadata::new(self.llm_client.model_name()),
        })
    }

    /// Validation happens here, synchronously, before any bytes are written
    /// to the response. Once the caller starts consuming the stream the
    /// transport is committed and errors must travel in-band.
    #[tracing::instrument(skip(self, request))]
    pub async fn answer_stream(
        &self,
        request: QuestionRequest,
    ) -> Result<AnswerStream, QuestionError> {
        let prompt = self.validated_prompt(&request)?;

        let tokens = self.llm_client.complete_stream(&prompt).await?;

        Ok(AnswerStream {
            tokens,
            metadata: AnswerMetadata::new(self.llm_client.model_name()),
        })
    }

    fn validated_prompt(&self, request: &QuestionRequest) -> Result<String, QuestionError> {
        if !self.llm_client.is_configured() {
            return Err(QuestionError::ProviderNotConfigured);
        }
        if request.question.trim().is_empty() {
            return Err(QuestionError::MissingQuestion);
        }
        if request.context.is_null() {
            return Err(QuestionError::MissingContext);
        }

        Ok(build_question_prompt(
            &request.question,
            &request.context,
            &request.history,
            request.original_text.as_deref(),
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    #[error("question is required")]
    MissingQuestion,
    #[error("analysis context is required")]
    MissingContext,
    #[error("analysis provider is not configured")]
    ProviderNotConfigured,
    #[error("provider call failed: {0}")]
    Provider(#[from] LlmClientError),
}
