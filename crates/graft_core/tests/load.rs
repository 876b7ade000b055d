//! Integration tests for loading configuration files from disk.

use std::io::Write;

use graft_core::{ConfigError, GraftConfig, TracingFormat};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Verifies that a file on disk loads into the same shape as parsed text.
#[test]
fn loads_config_file() {
    let file = write_config(
        r#"{
            "tracing": { "format": "json", "span_events": true },
            "templates": { "list": { "includes": { "Row": "x-row" } } }
        }"#,
    );

    let config = GraftConfig::load(file.path()).unwrap();

    assert_eq!(config.tracing.format, TracingFormat::Json);
    assert!(config.tracing.span_events);
    assert_eq!(
        config
            .template("list")
            .and_then(|t| t.includes.get("Row"))
            .map(|include| include.tag()),
        Some("x-row")
    );
}

/// Verifies that a missing file reports the path it tried to read.
#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let error = GraftConfig::load(&path).unwrap_err();

    match error {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

/// Verifies that malformed JSON surfaces as a parse error.
#[test]
fn malformed_file_is_parse_error() {
    let file = write_config("{ \"templates\": [");

    assert!(matches!(
        GraftConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

/// Verifies that an invalid filter in the file is caught when the subscriber
/// is built, not when the file is parsed.
#[test]
fn invalid_filter_fails_at_setup() {
    let file = write_config(r#"{ "tracing": { "env_filter": "graft=nope" } }"#);

    let config = GraftConfig::load(file.path()).unwrap();
    let setup = config.tracing_setup().unwrap();

    assert!(matches!(
        setup.env_filter(),
        Err(ConfigError::InvalidFilter { .. })
    ));
}
