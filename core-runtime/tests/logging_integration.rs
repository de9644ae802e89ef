//! Integration tests for logging system

use bridge_traits::logging::{ConsoleLogger, LogLevel};
use core_runtime::logging::{
    init_logging, redact_if_sensitive, strip_path, LogFormat, LoggingConfig,
};
use std::sync::Arc;

#[test]
fn test_config_builder() {
    // init_logging can only succeed once per process, so most tests stay on the builder
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(config.enable_spans);
    assert!(config.logger_sink.is_none());
}

#[test]
fn test_redaction_of_secrets() {
    assert_eq!(redact_if_sensitive("api_key", "abc123"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("session_cookie", "c=1"), "[REDACTED]");
}

#[test]
fn test_redaction_of_emails() {
    let redacted = redact_if_sensitive("contact", "morty@smith.com");

    assert!(redacted.starts_with('m'));
    assert!(redacted.contains("[REDACTED]"));
    assert!(!redacted.contains("smith.com"));
}

#[test]
fn test_normal_values_pass_through() {
    assert_eq!(redact_if_sensitive("id", "12345"), "12345");
    assert_eq!(redact_if_sensitive("name", "Morty Smith"), "Morty Smith");
    assert_eq!(redact_if_sensitive("status", "unknown"), "unknown");
}

#[test]
fn test_path_stripping() {
    assert_eq!(
        strip_path("/home/user/.local/share/character-catalog/favorites.json"),
        "favorites.json"
    );
    assert_eq!(
        strip_path("C:\\Users\\Beth\\AppData\\Roaming\\favorites.json"),
        "favorites.json"
    );
    assert_eq!(strip_path("favorites.json"), "favorites.json");
    assert_eq!(strip_path("/var/log/"), "");
    assert_eq!(strip_path(""), "");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LoggingConfig::default().format, LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LoggingConfig::default().format, LogFormat::Json);
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_filter("core_api=debug,core_catalog=trace")
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true)
        .with_logger_sink(Arc::new(ConsoleLogger::default()));

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(
        config.filter.as_deref(),
        Some("core_api=debug,core_catalog=trace")
    );
    assert!(!config.display_target);
    assert!(config.display_thread_info);
    assert!(config.logger_sink.is_some());
    assert!(format!("{:?}", config).contains("LoggerSink { ... }"));
}

#[test]
fn test_init_logging_twice_fails() {
    let config = LoggingConfig::default().with_format(LogFormat::Compact);

    init_logging(config.clone()).unwrap();
    assert!(init_logging(config).is_err());
}
