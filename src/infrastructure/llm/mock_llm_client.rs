use crate::application::ports::{LlmClient, LlmClientError, LlmTokenStream, SpeechAudio};

/// Canned-response client for tests and scaffold mode.
pub struct MockLlmClient {
    response: String,
    stream_tokens: Vec<String>,
    stream_failure: Option<String>,
}

impl MockLlmClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            stream_tokens: vec!["Mock ".to_string(), "answer".to_string()],
            stream_failure: None,
        }
    }

    pub fn with_stream_tokens(mut self, tokens: Vec<String>) -> Self {
        self.stream_tokens = tokens;
        self
    }

    /// Inject a provider failure after the configured tokens have streamed.
    pub fn with_stream_failure(mut self, message: impl Into<String>) -> Self {
        self.stream_failure = Some(message.into());
        self
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new(r#"{"summary":{"documentType":"Mock Agreement","overview":"Mock overview."}}"#)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn model_name(&self) -> &str {
        "mock-model"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.response.clone())
    }

    async fn complete_stream(&self, _prompt: &str) -> Result<LlmTokenStream, LlmClientError> {
        let mut items: Vec<Result<String, LlmClientError>> =
            self.stream_tokens.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.stream_failure {
            items.push(Err(LlmClientError::ApiRequestFailed(message.clone())));
        }
        Ok(Box::pin(futures::stream::iter(items)))
    }

    async fn synthesize_speech(
        &self,
        _text: &str,
        _voice_name: &str,
        _style_prompt: Option<&str>,
    ) -> Result<SpeechAudio, LlmClientError> {
        Ok(SpeechAudio {
            data: "bW9jayBhdWRpbw==".to_string(),
            mime_type: "audio/L16;codec=pcm;rate=24000".to_string(),
        })
    }
}
