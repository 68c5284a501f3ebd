mod analyze;
mod health;
mod question;
mod speech;
mod user_data;

pub use analyze::analyze_document_handler;
pub use health::health_handler;
pub use question::{ask_question_handler, ask_question_stream_handler};
pub use speech::text_to_speech_handler;
pub use user_data::{delete_user_data_handler, get_user_data_handler, save_user_data_handler};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Uniform error body: `error` is a stable machine-readable label,
/// `message` is user-facing.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
        .into_response()
}
