mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ClassifierSettings, CorsSettings, LoggingSettings, ServerSettings, Settings,
    SpeechToTextSettings, UploadSettings,
};
