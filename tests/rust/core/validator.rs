//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.

use opal_guard::validator::{nesting_depth, validate_structure, OpalQueryView, STRUCTURAL_CHECKS};
use opal_guard::{OpalError, OpalValidatorConfig};

fn check(query: &str) -> Result<(), OpalError> {
    validate_structure(query, &OpalValidatorConfig::default())
}

#[test]
fn test_checks_run_in_documented_order() {
    let names: Vec<&str> = STRUCTURAL_CHECKS.iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            "balanced_delimiters",
            "quote_parity",
            "stage_count",
            "nesting_depth",
            "known_verbs",
            "known_functions"
        ]
    );
}

#[test]
fn test_first_violation_wins() {
    // Unbalanced and also has an unknown verb: the balance error is reported.
    let err = check("bogus f(x").unwrap_err();
    assert!(matches!(err, OpalError::Structural { .. }));
}

#[test]
fn test_unbalanced_brackets_and_braces() {
    let err = check("make_col a:b[0").unwrap_err();
    assert_eq!(err.to_string(), "Unbalanced brackets: 1 opening '[' vs 0 closing ']'");
    let err = check("make_col a:make_object({x:1)").unwrap_err();
    assert!(err.to_string().starts_with("Unbalanced braces"));
}

#[test]
fn test_stage_limit_is_configurable() {
    let config = OpalValidatorConfig {
        max_stages: 2,
        ..Default::default()
    };
    let err = validate_structure("limit 1 | limit 1 | limit 1", &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Query has 3 pipeline stages, exceeding the maximum of 2"
    );
}

#[test]
fn test_exactly_at_limits_is_valid() {
    let query = vec!["limit 1"; 20].join(" | ");
    assert!(check(&query).is_ok());
    let nested = format!("filter {}x{}", "(".repeat(10), ")".repeat(10));
    assert!(check(&nested).is_ok());
}

#[test]
fn test_unknown_verb_message() {
    let err = check("filter a = 1 | filtr b = 2").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Unknown verb 'filtr' at stage 2."));
    assert!(message.contains("filter"));
}

#[test]
fn test_sql_function_hint_is_verbatim() {
    let err = check("make_col n:length(name)").unwrap_err();
    match err {
        OpalError::UnknownFunction {
            function,
            hint: Some(hint),
            suggestions,
        } => {
            assert_eq!(function, "length");
            assert!(hint.contains("strlen"));
            assert!(suggestions.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_function_suggestions() {
    let err = check("make_col n:strlenn(name)").unwrap_err();
    match err {
        OpalError::UnknownFunction {
            hint: None,
            suggestions,
            ..
        } => {
            assert!(suggestions.contains(&"strlen".to_string()));
            assert!(suggestions.len() <= 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unterminated_single_quote_is_rejected() {
    let err = check("filter name = 'abc | filter x = foo(bar").unwrap_err();
    assert!(matches!(err, OpalError::Structural { .. }));
    assert_eq!(
        err.to_string(),
        "Unterminated single-quoted string: ''' at offset 14 is never closed"
    );
}

#[test]
fn test_unterminated_regex_is_rejected() {
    let err = check("filter body ~ /abc | filter x = foo(bar").unwrap_err();
    assert!(matches!(err, OpalError::Structural { .. }));
    assert!(err.to_string().starts_with("Unterminated regex literal"));
}

#[test]
fn test_validate_reports_unterminated_literals() {
    for query in [
        "filter name = 'abc | filter x = foo(bar",
        "filter body ~ /abc | filter x = foo(bar",
    ] {
        let result = opal_guard::validate(query, None);
        assert!(!result.is_valid, "{query}");
        assert!(result.error_message.is_some());
    }
}

#[test]
fn test_calls_inside_literals_are_ignored() {
    assert!(check(r#"filter body ~ "length(x)" or msg = 'coalesce(a)'"#).is_ok());
}

#[test]
fn test_quoted_path_segment_before_paren() {
    assert!(check(r#"filter attributes."http.method" = "GET" and (a = 1)"#).is_ok());
}

#[test]
fn test_nesting_depth_counts_all_delimiters() {
    let view = OpalQueryView::new("make_col a:f([{1}])");
    assert_eq!(nesting_depth(&view), 3);
}
