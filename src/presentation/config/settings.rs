use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::application::services::PollPolicy;

use super::Environment;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub speech_to_text: SpeechToTextSettings,
    pub classifier: ClassifierSettings,
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}` and `APP__*` variables,
    /// later sources overriding earlier ones.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());

        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns a description of every setting that makes the service unusable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.speech_to_text.api_key.trim().is_empty() {
            problems.push("speech_to_text.api_key is empty".to_string());
        }
        if let Err(e) = self.cors.origin_header() {
            problems.push(format!(
                "cors.allowed_origin {:?} is not a valid header value: {}",
                self.cors.allowed_origin, e
            ));
        }
        if self.speech_to_text.poll_max_attempts == 0 {
            problems.push("speech_to_text.poll_max_attempts must be positive".to_string());
        }
        if self.speech_to_text.timeout_seconds == 0 {
            problems.push("speech_to_text.timeout_seconds must be positive".to_string());
        }
        if self.classifier.timeout_seconds == 0 {
            problems.push("classifier.timeout_seconds must be positive".to_string());
        }
        if self.uploads.max_file_size_mb == 0 {
            problems.push("uploads.max_file_size_mb must be positive".to_string());
        }
        problems
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    pub allowed_origin: String,
}

impl CorsSettings {
    pub fn origin_header(&self) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.allowed_origin)
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechToTextSettings {
    pub base_url: String,
    pub api_key: String,
    pub language_code: String,
    pub poll_max_attempts: u32,
    pub poll_interval_seconds: u64,
    pub timeout_seconds: u64,
}

impl SpeechToTextSettings {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.poll_max_attempts,
            interval: Duration::from_secs(self.poll_interval_seconds),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for SpeechToTextSettings {
    fn default() -> Self {
        let poll = PollPolicy::default();
        Self {
            base_url: "https://api.assemblyai.com".to_string(),
            api_key: String::new(),
            language_code: "en_us".to_string(),
            poll_max_attempts: poll.max_attempts,
            poll_interval_seconds: poll.interval.as_secs(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: usize,
    pub timeout_seconds: u64,
}

impl ClassifierSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "Eomer/gpt-3.5-turbo".to_string(),
            max_tokens: 500,
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Spool directory; the system temp dir when unset.
    #[serde(default)]
    pub spool_dir: Option<PathBuf>,
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            spool_dir: None,
            max_file_size_mb: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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
