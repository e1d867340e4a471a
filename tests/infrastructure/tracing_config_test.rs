use callscreen::infrastructure::observability::TracingConfig;
use callscreen::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_logging_settings_when_building_config_then_fields_are_copied() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.environment, "Prod");
    assert!(config.json_format);
    assert_eq!(
        config.default_directive(),
        "warn,callscreen=debug,tower_http=debug"
    );
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();

    assert!(!config.environment.is_empty());
    assert_eq!(config.default_level, "info");
}
