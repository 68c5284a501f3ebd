use config::{Config, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub llm: LlmSettings,
    pub limits: LimitsSettings,
    pub staging: StagingSettings,
    pub logging: LoggingSettings,
    pub features: FeatureSettings,
}

impl Settings {
    /// Layer `appsettings.<env>.toml` (optional) under `APP_`-prefixed
    /// environment variables.
    pub fn load(environment: Environment) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .separator("_")
                    .list_separator(" "),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/lexguard".to_string(),
            max_connections: 5,
            run_migrations: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub tts_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub sse_keep_alive_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            chat_model: "gemini-2.0-flash".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            max_output_tokens: 8192,
            temperature: 0.2,
            sse_keep_alive_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsSettings {
    pub min_document_chars: usize,
    pub max_document_chars: usize,
    pub max_upload_bytes: usize,
    /// `None` disables the speech text cap.
    pub tts_max_bytes: Option<usize>,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            min_document_chars: 100,
            max_document_chars: 100_000,
            max_upload_bytes: 10 * 1024 * 1024,
            tts_max_bytes: Some(900),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StagingSettings {
    pub dir: String,
    pub sweep_interval_seconds: u64,
    pub max_age_seconds: u64,
}

impl Default for StagingSettings {
    fn default() -> Self {
        Self {
            dir: "./uploads".to_string(),
            sweep_interval_seconds: 3600,
            max_age_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

/// Unifies the deployment variants: account integration and streaming are
/// switched here instead of living in parallel server builds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    pub accounts: bool,
    pub enforce_account: bool,
    pub streaming: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            accounts: false,
            enforce_account: false,
            streaming: true,
        }
    }
}
