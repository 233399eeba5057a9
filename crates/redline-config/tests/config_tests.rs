// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Redline configuration system.

use redline_config::diagnostic::ConfigError;
use redline_config::model::RedlineConfig;
use redline_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_redline_config() {
    let toml = r#"
[logging]
level = "debug"

[remote]
base_url = "http://localhost:9000"
access_token = "figd_test"
timeout_secs = 10
max_retries = 3

[sync]
documents_root = "/tmp/notes"
output_folder = "Reviews"
archive_folder = "Reviews/Archive"
interval_minutes = 15
include_frame_info = false
sync_on_start = false

[frames]
cache_ttl_hours = 6
placeholder_node_id = "0:0"
max_depth = 64

[[files]]
id = "web"
name = "Web App"
file_key = "ABC123XYZ"

[[files]]
id = "ios"
name = "iOS"
file_key = "IOS987"
enabled = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.remote.base_url, "http://localhost:9000");
    assert_eq!(config.remote.access_token.as_deref(), Some("figd_test"));
    assert_eq!(config.remote.timeout_secs, 10);
    assert_eq!(config.remote.max_retries, 3);
    assert_eq!(config.sync.documents_root, "/tmp/notes");
    assert_eq!(config.sync.output_folder, "Reviews");
    assert_eq!(config.sync.archive_folder.as_deref(), Some("Reviews/Archive"));
    assert_eq!(config.sync.interval_minutes, 15);
    assert!(!config.sync.include_frame_info);
    assert!(!config.sync.sync_on_start);
    assert_eq!(config.frames.cache_ttl_hours, 6);
    assert_eq!(config.frames.placeholder_node_id, "0:0");
    assert_eq!(config.frames.max_depth, 64);
    assert_eq!(config.files.len(), 2);
    assert!(config.files[0].enabled, "enabled defaults to true");
    assert!(!config.files[1].enabled);
    assert!(config.files.iter().all(|f| f.last_sync.is_none()));
}

/// Missing sections fall back to defaults.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    let defaults = RedlineConfig::default();
    assert_eq!(config.sync.output_folder, defaults.sync.output_folder);
    assert_eq!(config.frames.cache_ttl_hours, 24);
    assert!(config.files.is_empty());
}

/// Dot-notation overrides (what the env provider produces) reach nested keys.
#[test]
fn dotted_override_sets_access_token() {
    use figment::{providers::Serialized, Figment};

    let config: RedlineConfig = Figment::new()
        .merge(Serialized::defaults(RedlineConfig::default()))
        .merge(("remote.access_token", "figd_from_env"))
        .extract()
        .expect("should set access_token via dot notation");

    assert_eq!(config.remote.access_token.as_deref(), Some("figd_from_env"));
}

/// Unknown top-level sections are rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let err = load_config_from_str("[telemetry]\nenabled = true\n")
        .expect_err("should reject unknown section");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telemetry"),
        "got: {err_str}"
    );
}

/// Unknown key in a section produces an UnknownKey diagnostic with a suggestion.
#[test]
fn diagnostic_suggests_closest_key() {
    let toml = r#"
[sync]
output_fodler = "Reviews"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "output_fodler"
                && suggestion.as_deref() == Some("output_folder")
                && valid_keys.contains("archive_folder")
        })
    });
    assert!(found, "expected UnknownKey for output_fodler, got: {errors:?}");
}

/// Unknown key inside an array of tables is reported too.
#[test]
fn diagnostic_for_typo_in_files_entry() {
    let toml = r#"
[[files]]
id = "web"
name = "Web"
file_key = "K1"
enabeld = false
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, .. }
            if key == "enabeld" && suggestion.as_deref() == Some("enabled"))
    });
    assert!(found, "got: {errors:?}");
}

/// A files entry without a file_key is a missing-key diagnostic.
#[test]
fn diagnostic_missing_file_key() {
    let toml = r#"
[[files]]
id = "web"
name = "Web"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key.ends_with("file_key"))),
        "got: {errors:?}"
    );
}

/// Wrong value type produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[sync]
interval_minutes = "often"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("interval_minutes"),
        "got: {err_str}"
    );
}

/// ConfigError renders through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "fle_key".to_string(),
        suggestion: Some("file_key".to_string()),
        valid_keys: "id, name, file_key, enabled".to_string(),
        span: None,
        src: None,
    };
    assert!(error.code().is_some());
    let help = error.help().expect("should have help").to_string();
    assert!(help.contains("did you mean `file_key`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("fle_key"));
}

/// Semantic validation runs after successful deserialization.
#[test]
fn validation_catches_duplicate_file_keys() {
    let toml = r#"
[[files]]
id = "a"
name = "A"
file_key = "SAME"

[[files]]
id = "b"
name = "B"
file_key = "SAME"
"#;

    let errors = load_and_validate_str(toml).expect_err("duplicate keys should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate file_key"))
    ));
}

/// Loading an explicit path applies the file on top of defaults.
#[test]
#[serial_test::serial]
fn load_and_validate_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("redline.toml");
    std::fs::write(&path, "[sync]\noutput_folder = \"From File\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file should validate");
    assert_eq!(config.sync.output_folder, "From File");
    assert_eq!(config.sync.interval_minutes, 30);
}
