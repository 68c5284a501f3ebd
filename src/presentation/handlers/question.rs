use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderName, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::application::ports::{LlmClient, TextExtractor};
use crate::application::services::{AnswerMetadata, QuestionError, QuestionRequest};
use crate::domain::ConversationTurn;
use crate::infrastructure::observability::log_excerpt;
use crate::presentation::handlers::error_response;
use crate::presentation::state::AppState;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionBody {
    question: String,
    analysis_id: Option<String>,
    context: Value,
    conversation_history: Vec<ConversationTurn>,
    original_text: Option<String>,
}

#[derive(Serialize)]
struct AnswerResponse {
    success: bool,
    answer: String,
    metadata: AnswerMetadata,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamEvent {
    Chunk {
        text: String,
    },
    Done {
        #[serde(rename = "fullText")]
        full_text: String,
        metadata: AnswerMetadata,
    },
}

impl QuestionBody {
    fn into_request(self) -> QuestionRequest {
        QuestionRequest {
            question: self.question,
            context: self.context,
            history: self.conversation_history,
            original_text: self.original_text,
        }
    }
}

#[tracing::instrument(skip(state, body), fields(analysis_id = ?body.analysis_id))]
pub async fn ask_question_handler<E, L>(
    State(state): State<AppState<E, L>>,
    Json(body): Json<QuestionBody>,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    tracing::debug!(question = %log_excerpt(&body.question), "Processing question");

    match state.question_service.answer(body.into_request()).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(AnswerResponse {
                success: true,
                answer: answer.text,
                metadata: answer.metadata,
            }),
        )
            .into_response(),
        Err(e) => question_error_response(e),
    }
}

#[tracing::instrument(skip(state, body), fields(analysis_id = ?body.analysis_id))]
pub async fn ask_question_stream_handler<E, L>(
    State(state): State<AppState<E, L>>,
    Json(body): Json<QuestionBody>,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    tracing::debug!(question = %log_excerpt(&body.question), "Processing streamed question");

    let answer_stream = match state
        .question_service
        .answer_stream(body.into_request())
        .await
    {
        Ok(stream) => stream,
        // Not yet committed to the event stream, so a plain error response
        // is still possible here.
        Err(e) => return question_error_response(e),
    };

    let metadata = answer_stream.metadata;
    let mut tokens = answer_stream.tokens;
    let keep_alive_seconds = state.settings.llm.sse_keep_alive_seconds;

    let sse_stream = async_stream::stream! {
        let mut full_text = String::new();

        loop {
            match tokens.next().await {
                Some(Ok(token)) => {
                    full_text.push_str(&token);
                    let event = StreamEvent::Chunk { text: token };
                    let data = serde_json::to_string(&event).unwrap_or_default();
                    yield Ok::<_, Infallible>(Event::default().data(data));
                }
                Some(Err(e)) => {
                    // Headers are committed; the failure has to travel on
                    // the stream itself.
                    tracing::error!(error = %e, "Provider stream failed mid-answer");
                    let data = json!({ "error": e.to_string() }).to_string();
                    yield Ok(Event::default().data(data));
                    break;
                }
                None => {
                    let event = StreamEvent::Done { full_text, metadata };
                    let data = serde_json::to_string(&event).unwrap_or_default();
                    yield Ok(Event::default().data(data));
                    break;
                }
            }
        }
    };

    let sse = Sse::new(sse_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(keep_alive_seconds))
            .text("keep-alive"),
    );

    (
        [
            (CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        sse,
    )
        .into_response()
}

fn question_error_response(err: QuestionError) -> Response {
    match &err {
        QuestionError::MissingQuestion | QuestionError::MissingContext => {
            error_response(StatusCode::BAD_REQUEST, "invalid_request", err.to_string())
        }
        QuestionError::ProviderNotConfigured => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "provider_not_configured",
            err.to_string(),
        ),
        QuestionError::Provider(e) => {
            tracing::error!(error = %e, "Provider call failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "provider_error",
                err.to_string(),
            )
        }
    }
}
