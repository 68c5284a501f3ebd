use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError, LlmTokenStream, SpeechAudio};
use crate::presentation::config::LlmSettings;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    tts_model: String,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiClient {
    fn text_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                max_output_tokens: Some(self.max_output_tokens),
                response_modalities: None,
                speech_config: None,
            }),
        }
    }

    async fn post_generate(
        &self,
        model: &str,
        action: &str,
        body: &GenerateContentRequest,
    ) -> Result<reqwest::Response, LlmClientError> {
        let url = format!("{}/models/{}:{}", self.base_url, model, action);
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }

    fn first_part(response: GenerateContentResponse) -> Result<Part, LlmClientError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .ok_or_else(|| LlmClientError::InvalidResponse("empty candidates".to_string()))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn model_name(&self) -> &str {
        &self.chat_model
    }

    fn speech_model_name(&self) -> &str {
        &self.tts_model
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let body = self.text_request(prompt);
        let response = self
            .post_generate(&self.chat_model, "generateContent", &body)
            .await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        Self::first_part(parsed)?
            .text
            .ok_or_else(|| LlmClientError::InvalidResponse("candidate carried no text".to_string()))
    }

    async fn complete_stream(&self, prompt: &str) -> Result<LlmTokenStream, LlmClientError> {
        let body = self.text_request(prompt);
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.chat_model
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let stream = response.bytes_stream();
        let token_stream = Box::pin(stream.flat_map(|chunk_result| {
            let items: Vec<Result<String, LlmClientError>> = match chunk_result {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let mut tokens = Vec::new();
                    for line in text.lines() {
                        let Some(data) = line.strip_prefix("data: ") else {
                            continue;
                        };
                        if let Ok(chunk) = serde_json::from_str::<GenerateContentResponse>(data) {
                            let token = chunk
                                .candidates
                                .into_iter()
                                .next()
                                .and_then(|c| c.content)
                                .and_then(|c| c.parts.into_iter().next())
                                .and_then(|p| p.text);
                            if let Some(token) = token {
                                tokens.push(Ok(token));
                            }
                        }
                    }
                    tokens
                }
                Err(e) => vec![Err(LlmClientError::ApiRequestFailed(e.to_string()))],
            };
            futures::stream::iter(items)
        }));

        Ok(token_stream)
    }

    async fn synthesize_speech(
        &self,
        text: &str,
        voice_name: &str,
        style_prompt: Option<&str>,
    ) -> Result<SpeechAudio, LlmClientError> {
        let spoken = match style_prompt {
            Some(style) => format!("{}: {}", style, text),
            None => text.to_string(),
        };

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(spoken),
                    inline_data: None,
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: None,
                max_output_tokens: None,
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice_name.to_string(),
                        },
                    },
                }),
            }),
        };

        let response = self
            .post_generate(&self.tts_model, "generateContent", &body)
            .await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let inline = Self::first_part(parsed)?.inline_data.ok_or_else(|| {
            LlmClientError::InvalidResponse("candidate carried no audio".to_string())
        })?;

        Ok(SpeechAudio {
            data: inline.data,
            mime_type: inline.mime_type,
        })
    }
}

pub fn create_gemini_client(settings: &LlmSettings) -> GeminiClient {
    GeminiClient {
        client: Client::new(),
        base_url: settings
            .base_url
            .trim_end_matches('/')
            .to_string(),
        api_key: settings.api_key.clone(),
        chat_model: settings.chat_model.clone(),
        tts_model: settings.tts_model.clone(),
        max_output_tokens: settings.max_output_tokens,
        temperature: settings.temperature,
    }
}
