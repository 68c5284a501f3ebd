use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{LlmClient, TextExtractor};
use crate::application::services::{
    AnalysisError, AnalysisInput, AnalysisSource, RequestMetadata, UserInfo,
};
use crate::domain::{Analysis, Parties};
use crate::infrastructure::observability::log_excerpt;
use crate::presentation::handlers::error_response;
use crate::presentation::state::AppState;

#[derive(Deserialize, Default)]
struct AnalyzeBody {
    text: Option<String>,
    parties: Option<Value>,
    email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    success: bool,
    analysis: Analysis,
    original_text: String,
    metadata: RequestMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_info: Option<UserInfo>,
}

struct RawAnalyzeRequest {
    file: Option<(String, Vec<u8>)>,
    text: Option<String>,
    parties: Option<Value>,
    email: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_document_handler<E, L>(
    State(state): State<AppState<E, L>>,
    request: Request,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    let raw = match read_request(request).await {
        Ok(raw) => raw,
        Err(response) => return response,
    };

    let (source, parties, email) = match resolve_source(raw) {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    let input = AnalysisInput {
        source,
        parties: parse_parties(parties),
        email,
    };

    match state.analysis_service.analyze(input).await {
        Ok(outcome) => {
            tracing::debug!(
                excerpt = %log_excerpt(&outcome.original_text),
                "Returning analysis"
            );
            (
                StatusCode::OK,
                Json(AnalyzeResponse {
                    success: true,
                    analysis: outcome.analysis,
                    original_text: outcome.original_text,
                    metadata: outcome.metadata,
                    user_info: outcome.user_info,
                }),
            )
                .into_response()
        }
        Err(e) => analysis_error_response(e),
    }
}

/// The endpoint accepts either a multipart upload or a JSON body; dispatch
/// on the declared content type.
async fn read_request(request: Request) -> Result<RawAnalyzeRequest, Response> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &()).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read multipart body");
            error_response(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                format!("Failed to read multipart body: {}", e),
            )
        })?;
        read_multipart(multipart).await
    } else {
        let Json(body) = Json::<AnalyzeBody>::from_request(request, &())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to read JSON body");
                error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_request",
                    format!("Failed to read request body: {}", e),
                )
            })?;
        Ok(RawAnalyzeRequest {
            file: None,
            text: body.text,
            parties: body.parties,
            email: body.email,
        })
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<RawAnalyzeRequest, Response> {
    let mut raw = RawAnalyzeRequest {
        file: None,
        text: None,
        parties: None,
        email: None,
    };

    loop {
        let field = multipart.next_field().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read multipart field");
            error_response(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                format!("Failed to read multipart field: {}", e),
            )
        })?;
        let Some(field) = field else { break };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "document" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "Failed to read uploaded file");
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "invalid_request",
                        format!("Failed to read uploaded file: {}", e),
                    )
                })?;
                raw.file = Some((filename, bytes.to_vec()));
            }
            "text" => raw.text = field.text().await.ok(),
            "parties" => raw.parties = field.text().await.ok().map(Value::String),
            "email" => raw.email = field.text().await.ok(),
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(raw)
}

type ResolvedRequest = (AnalysisSource, Option<Value>, Option<String>);

fn resolve_source(raw: RawAnalyzeRequest) -> Result<ResolvedRequest, Response> {
    let RawAnalyzeRequest {
        file,
        text,
        parties,
        email,
    } = raw;

    let text = text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let source = match (file, text) {
        (Some((filename, bytes)), None) => AnalysisSource::File { filename, bytes },
        (None, Some(text)) => AnalysisSource::Text(text),
        _ => return Err(analysis_error_response(AnalysisError::MissingInput)),
    };

    Ok((source, parties, email))
}

/// Parties arrive either as a JSON-encoded string (multipart) or a native
/// object (JSON body). Malformed input means "no parties", never a failed
/// request.
fn parse_parties(value: Option<Value>) -> Option<Parties> {
    let parsed = match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match serde_json::from_str::<Parties>(&s) {
            Ok(parties) => Some(parties),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed parties payload");
                None
            }
        },
        other => match serde_json::from_value::<Parties>(other) {
            Ok(parties) => Some(parties),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed parties payload");
                None
            }
        },
    };

    parsed.filter(|p| !p.is_empty())
}

fn analysis_error_response(err: AnalysisError) -> Response {
    match &err {
        AnalysisError::MissingInput
        | AnalysisError::ContentTooShort { .. }
        | AnalysisError::ContentTooLong { .. }
        | AnalysisError::MissingEmail
        | AnalysisError::UnsupportedFileType(_) => {
            error_response(StatusCode::BAD_REQUEST, "invalid_request", err.to_string())
        }
        AnalysisError::UnknownAccount(_) => {
            error_response(StatusCode::FORBIDDEN, "unknown_account", err.to_string())
        }
        AnalysisError::ProviderNotConfigured => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "provider_not_configured",
            err.to_string(),
        ),
        AnalysisError::Staging(e) => {
            tracing::error!(error = %e, "Failed to stage uploaded document");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "Failed to store uploaded document".to_string(),
            )
        }
        AnalysisError::Extraction(e) => {
            // Decoder detail stays in the logs; callers get one uniform
            // message for every extraction failure.
            tracing::error!(error = %e, "Text extraction failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "extraction_error",
                "Failed to extract text from document".to_string(),
            )
        }
        AnalysisError::Provider(e) => {
            tracing::error!(error = %e, "Provider call failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "provider_error",
                err.to_string(),
            )
        }
    }
}
