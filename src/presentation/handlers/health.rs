use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{LlmClient, TextExtractor};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub gemini_configured: bool,
}

pub async fn health_handler<E, L>(State(state): State<AppState<E, L>>) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Legal document analysis service is running".to_string(),
            timestamp: Utc::now(),
            gemini_configured: state.llm_client.is_configured(),
        }),
    )
}
