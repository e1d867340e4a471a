use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_level: String,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: logging.enable_json,
            default_level: logging.level.clone(),
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        format!("{},callscreen=debug,tower_http=debug", self.default_level)
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = Environment::from_env().unwrap_or(Environment::Local);
        Self::from_settings(environment, &LoggingSettings::default())
    }
}
