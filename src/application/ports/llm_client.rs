use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

pub type LlmTokenStream =
    Pin<Box<dyn Stream<Item = Result<String, LlmClientError>> + Send + 'static>>;

/// Synthesized audio relayed to the caller untouched.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub data: String,
    pub mime_type: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier reported in response metadata.
    fn model_name(&self) -> &str;

    /// Identifier of the speech-synthesis model, when the provider uses a
    /// separate one.
    fn speech_model_name(&self) -> &str {
        self.model_name()
    }

    /// Whether provider credentials were supplied at startup.
    fn is_configured(&self) -> bool;

    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;

    async fn complete_stream(&self, prompt: &str) -> Result<LlmTokenStream, LlmClientError>;

    async fn synthesize_speech(
        &self,
        text: &str,
        voice_name: &str,
        style_prompt: Option<&str>,
    ) -> Result<SpeechAudio, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
