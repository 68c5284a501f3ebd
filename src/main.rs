use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use lexguard::application::ports::{DocumentStaging, UserDataRepository};
use lexguard::application::services::{
    AccountPolicy, AnalysisLimits, AnalysisService, QuestionService, SpeechService,
};
use lexguard::infrastructure::llm::create_gemini_client;
use lexguard::infrastructure::observability::{init_tracing, TracingConfig};
use lexguard::infrastructure::persistence::{create_pg_pool, PgUserDataRepository};
use lexguard::infrastructure::storage::{spawn_sweeper, TempStore};
use lexguard::infrastructure::text_processing::CompositeExtractor;
use lexguard::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut settings = Settings::load(environment)?;
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        settings.llm.api_key = key;
    }

    init_tracing(TracingConfig {
        environment: environment.to_string(),
        json_format: settings.logging.enable_json,
    });

    if settings.llm.api_key.is_empty() {
        tracing::warn!(
            "GEMINI_API_KEY is not set; analysis endpoints will report provider-not-configured"
        );
    }

    let llm_client = Arc::new(create_gemini_client(&settings.llm));
    let extractor = Arc::new(CompositeExtractor::with_default_adapters());

    let pool = create_pg_pool(&settings.database).await?;
    let user_data_repository: Arc<dyn UserDataRepository> =
        Arc::new(PgUserDataRepository::new(pool));

    let temp_store = Arc::new(TempStore::new(settings.staging.dir.as_str())?);
    spawn_sweeper(
        Arc::clone(&temp_store),
        Duration::from_secs(settings.staging.sweep_interval_seconds),
        Duration::from_secs(settings.staging.max_age_seconds),
    );

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::clone(&extractor),
        Arc::clone(&llm_client),
        Arc::clone(&user_data_repository),
        Arc::clone(&temp_store) as Arc<dyn DocumentStaging>,
        AnalysisLimits {
            min_document_chars: settings.limits.min_document_chars,
            max_document_chars: settings.limits.max_document_chars,
        },
        AccountPolicy {
            enabled: settings.features.accounts,
            enforce: settings.features.enforce_account,
        },
    ));

    let question_service = Arc::new(QuestionService::new(Arc::clone(&llm_client)));
    let speech_service = Arc::new(SpeechService::new(
        Arc::clone(&llm_client),
        settings.limits.tts_max_bytes,
    ));

    let state = AppState {
        analysis_service,
        question_service,
        speech_service,
        user_data_repository,
        llm_client,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
