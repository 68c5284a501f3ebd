use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{LlmClient, RepositoryError, TextExtractor};
use crate::domain::UserDataRecord;
use crate::presentation::handlers::error_response;
use crate::presentation::state::AppState;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SaveUserDataBody {
    email: Option<String>,
    serial: Option<i32>,
    data: Option<Value>,
}

#[derive(Serialize)]
struct SaveUserDataResponse {
    success: bool,
    operation: String,
}

#[derive(Serialize)]
struct UserDataResponse {
    success: bool,
    records: Vec<UserDataRecord>,
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    message: String,
}

#[tracing::instrument(skip(state, body))]
pub async fn save_user_data_handler<E, L>(
    State(state): State<AppState<E, L>>,
    Json(body): Json<SaveUserDataBody>,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    let Some(email) = body.email.filter(|e| !e.trim().is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "email is required".to_string(),
        );
    };
    let Some(serial) = body.serial else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "serial is required".to_string(),
        );
    };
    let Some(data) = body.data else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "data is required".to_string(),
        );
    };

    match state
        .user_data_repository
        .save(&email, serial, &data)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SaveUserDataResponse {
                success: true,
                operation: outcome.as_str().to_string(),
            }),
        )
            .into_response(),
        Err(e) => store_error_response(e, &email, serial),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_user_data_handler<E, L>(
    State(state): State<AppState<E, L>>,
    Path(email): Path<String>,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    match state.user_data_repository.find_by_email(&email).await {
        Ok(records) if records.is_empty() => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No records found for {}", email),
        ),
        Ok(records) => (
            StatusCode::OK,
            Json(UserDataResponse {
                success: true,
                records,
            }),
        )
            .into_response(),
        Err(e) => store_error_response(e, &email, 0),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_user_data_handler<E, L>(
    State(state): State<AppState<E, L>>,
    Path((email, serial)): Path<(String, i32)>,
) -> Response
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    match state.user_data_repository.delete(&email, serial).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteResponse {
                success: true,
                message: format!("Deleted record {} for {}", serial, email),
            }),
        )
            .into_response(),
        Err(e) => store_error_response(e, &email, serial),
    }
}

fn store_error_response(err: RepositoryError, email: &str, serial: i32) -> Response {
    match err {
        RepositoryError::NotFound => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No record found for {} with serial {}", email, serial),
        ),
        RepositoryError::QueryFailed(message) => {
            tracing::error!(error = %message, "Store operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}
