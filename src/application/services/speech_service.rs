use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{LlmClient, LlmClientError};

const DEFAULT_VOICE: &str = "Kore";

#[derive(Debug)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_name: Option<String>,
    pub style_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResult {
    pub audio_data: String,
    pub mime_type: String,
    pub voice: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

pub struct SpeechService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    max_text_bytes: Option<usize>,
}

impl<L> SpeechService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, max_text_bytes: Option<usize>) -> Self {
        Self {
            llm_client,
            max_text_bytes,
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResult, SpeechError> {
        if !self.llm_client.is_configured() {
            return Err(SpeechError::ProviderNotConfigured);
        }

        let text = request.text.trim();
        if text.is_empty() {
            return Err(SpeechError::MissingText);
        }
        if let Some(max) = self.max_text_bytes {
            if text.len() > max {
                return Err(SpeechError::TextTooLong {
                    actual: text.len(),
                    maximum: max,
                });
            }
        }

        let voice = request.voice_name.as_deref().unwrap_or(DEFAULT_VOICE);

        let audio = self
            .llm_client
            .synthesize_speech(text, voice, request.style_prompt.as_deref())
            .await?;

        Ok(SpeechResult {
            audio_data: audio.data,
            mime_type: audio.mime_type,
            voice: voice.to_string(),
            model: self.llm_client.speech_model_name().to_string(),
            generated_at: Utc::now(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("text is required")]
    MissingText,
    #[error("text is too long for speech synthesis: {actual} bytes (maximum {maximum})")]
    TextTooLong { actual: usize, maximum: usize },
    #[error("analysis provider is not configured")]
    ProviderNotConfigured,
    #[error("provider call failed: {0}")]
    Provider(#[from] LlmClientError),
}
