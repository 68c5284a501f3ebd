use std::sync::Arc;

use crate::application::ports::{LlmClient, TextExtractor, UserDataRepository};
use crate::application::services::{AnalysisService, QuestionService, SpeechService};
use crate::presentation::config::Settings;

pub struct AppState<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    pub analysis_service: Arc<AnalysisService<E, L>>,
    pub question_service: Arc<QuestionService<L>>,
    pub speech_service: Arc<SpeechService<L>>,
    pub user_data_repository: Arc<dyn UserDataRepository>,
    pub llm_client: Arc<L>,
    pub settings: Settings,
}

impl<E, L> Clone for AppState<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            question_service: Arc::clone(&self.question_service),
            speech_service: Arc::clone(&self.speech_service),
            user_data_repository: Arc::clone(&self.user_data_repository),
            llm_client: Arc::clone(&self.llm_client),
            settings: self.settings.clone(),
        }
    }
}
