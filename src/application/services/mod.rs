mod analysis_service;
mod prompt_builder;
mod question_service;
mod response_normalizer;
mod speech_service;

pub use analysis_service::{
    AccountPolicy, AnalysisError, AnalysisInput, AnalysisLimits, AnalysisOutcome, AnalysisService,
    AnalysisSource, RequestMetadata, UserInfo,
};
pub use prompt_builder::{build_analysis_prompt, build_question_prompt};
pub use question_service::{
    Answer, AnswerMetadata, AnswerStream, QuestionError, QuestionRequest, QuestionService,
};
pub use response_normalizer::{normalize, risk_score};
pub use speech_service::{SpeechError, SpeechRequest, SpeechResult, SpeechService};
