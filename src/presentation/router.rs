use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, TextExtractor};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_document_handler, ask_question_handler, ask_question_stream_handler,
    delete_user_data_handler, get_user_data_handler, health_handler, save_user_data_handler,
    text_to_speech_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<E, L>(state: AppState<E, L>) -> Router
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut router = Router::new()
        .route("/api/health", get(health_handler::<E, L>))
        .route(
            "/api/analyze-document",
            post(analyze_document_handler::<E, L>),
        )
        .route("/api/ask-question", post(ask_question_handler::<E, L>))
        .route("/api/text-to-speech", post(text_to_speech_handler::<E, L>))
        .route("/api/save-user-data", post(save_user_data_handler::<E, L>))
        .route(
            "/api/get-user-data/{email}",
            get(get_user_data_handler::<E, L>),
        )
        .route(
            "/api/delete-user-data/{email}/{serial}",
            delete(delete_user_data_handler::<E, L>),
        );

    if state.settings.features.streaming {
        router = router.route(
            "/api/ask-question-stream",
            post(ask_question_stream_handler::<E, L>),
        );
    }

    router
        .layer(DefaultBodyLimit::max(state.settings.limits.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
