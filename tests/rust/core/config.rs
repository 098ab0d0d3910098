//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.

use std::io::Write;

use opal_guard::{OpalError, OpalValidator, OpalValidatorConfig};
use tempfile::Builder;

fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("tmp");
    file.write_all(content.as_bytes()).expect("write");
    file.flush().expect("flush");
    file
}

#[test]
fn test_load_json_config_file() {
    let file = write_config(".json", r#"{"max_stages": 3, "max_suggestions": 2}"#);
    let config = OpalValidatorConfig::from_file(file.path()).expect("load");
    assert_eq!(config.max_stages, 3);
    assert_eq!(config.max_suggestions, 2);
    assert_eq!(config.pass_rounds, 1);

    let validator = OpalValidator::new(config).expect("validator");
    let result = validator.validate("limit 1 | limit 1 | limit 1 | limit 1", None);
    assert_eq!(
        result.error_message.as_deref(),
        Some("Query has 4 pipeline stages, exceeding the maximum of 3")
    );
}

#[test]
fn test_load_yaml_config_file() {
    let file = write_config(
        ".yml",
        "pass_rounds: 2\ndisabled_passes:\n  - time_filter\n  - count_if\n",
    );
    let config = OpalValidatorConfig::from_file(file.path()).expect("load");
    assert_eq!(config.pass_rounds, 2);

    let validator = OpalValidator::new(config).expect("validator");
    let names = validator.pipeline().names();
    assert!(!names.contains(&"time_filter"));
    assert!(!names.contains(&"count_if"));
    assert_eq!(validator.pipeline().rounds(), 2);

    let query = r#"filter timestamp > @"1 hour ago" | limit 1"#;
    assert!(validator.validate(query, Some("1h")).transformed_query.is_none());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let file = write_config(".toml", "max_stages = 3");
    let err = OpalValidatorConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, OpalError::Config { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tmpdir");
    let err = OpalValidatorConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, OpalError::Io(_)));
}

#[test]
fn test_malformed_and_unknown_fields_are_serde_errors() {
    let file = write_config(".json", r#"{"max_stages": "many"}"#);
    assert!(matches!(
        OpalValidatorConfig::from_file(file.path()),
        Err(OpalError::Serde(_))
    ));

    let file = write_config(".yaml", "max_stage: 3\n");
    assert!(matches!(
        OpalValidatorConfig::from_file(file.path()),
        Err(OpalError::Serde(_))
    ));
}
