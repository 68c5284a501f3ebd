mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, FeatureSettings, LimitsSettings, LlmSettings, LoggingSettings,
    ServerSettings, Settings, StagingSettings,
};
