use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, TextExtractor};
use crate::application::services::{SpeechError, SpeechRequest};
use crate::presentation::handlers::error_response;
use crate::presentation::state::AppState;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechBody {
    text: String,
    voice_name: Option<String>,
    style_prompt: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechResponse {
    success: bool,
    audio_data: String,
    mime_type: String,
    metadata: SpeechMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechMetadata {
    voice: String,
    model: String,
    generated_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state, body))]
pub async fn text_to_speech_handler<E, L>(
    State(state): State<AppState<E, L>>,
    Json(body): Json<SpeechBody>,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    let request = SpeechRequest {
        text: body.text,
        voice_name: body.voice_name,
        style_prompt: body.style_prompt,
    };

    match state.speech_service.synthesize(request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SpeechResponse {
                success: true,
                audio_data: result.audio_data,
                mime_type: result.mime_type,
                metadata: SpeechMetadata {
                    voice: result.voice,
                    model: result.model,
                    generated_at: result.generated_at,
                },
            }),
        )
            .into_response(),
        Err(e) => speech_error_response(e),
    }
}

fn speech_error_response(err: SpeechError) -> Response {
    match &err {
        SpeechError::MissingText | SpeechError::TextTooLong { .. } => {
            error_response(StatusCode::BAD_REQUEST, "invalid_request", err.to_string())
        }
        SpeechError::ProviderNotConfigured => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "provider_not_configured",
            err.to_string(),
        ),
        SpeechError::Provider(e) => {
            tracing::error!(error = %e, "Speech synthesis failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "provider_error",
                err.to_string(),
            )
        }
    }
}
