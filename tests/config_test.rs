//! Configuration loading tests.

use std::io::Write;

use govsense::config::{load_config_from_path, ConfigError};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file_overrides_defaults() {
    let file = write_config(
        r#"
[service]
url = "http://classifier.internal:9000"
timeout_secs = 30

[log]
level = "debug"
"#,
    );

    let config = load_config_from_path(Some(file.path())).unwrap();
    assert_eq!(config.service.url, "http://classifier.internal:9000");
    assert_eq!(config.service.timeout_secs, Some(30));
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.orchestrator.queue_capacity, 64);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("[log]\njson = true\n");

    let config = load_config_from_path(Some(file.path())).unwrap();
    assert_eq!(config.service.url, "http://localhost:8000");
    assert_eq!(config.service.timeout_secs, None);
    assert!(config.log.json);
}

#[test]
fn test_invalid_url_is_rejected() {
    let file = write_config("[service]\nurl = \"classifier:8000\"\n");

    let err = load_config_from_path(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_config_from_path(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
}
