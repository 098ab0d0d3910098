//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.

use opal_guard::{validate, OpalValidationMetrics, OpalValidator, OpalValidatorConfig};
use proptest::prelude::*;

#[test]
fn test_clean_query_passes_untouched() {
    let result = validate(
        r#"filter service_name = "checkout" | statsby errors:count(), group_by(host) | sort desc(errors) | limit 10"#,
        None,
    );
    assert!(result.is_valid);
    assert_eq!(result.transformed_query, None);
    assert!(result.transformations.is_empty());
    assert_eq!(result.error_message, None);
}

#[test]
fn test_missing_close_paren_is_invalid() {
    let result = validate("filter x = foo(bar", None);
    assert!(!result.is_valid);
    assert!(result.error_message.unwrap().contains("parentheses"));
}

#[test]
fn test_bracket_terms_become_or_chain() {
    let result = validate("filter body ~ <error exception>", None);
    assert!(result.is_valid);
    assert_eq!(
        result.transformed_query.as_deref(),
        Some(r#"filter (contains(body, "error") or contains(body, "exception"))"#)
    );
    assert_eq!(result.transformations.len(), 1);

    let single = validate("filter body ~ <error>", None);
    assert!(single.transformed_query.is_none());
}

#[test]
fn test_nested_field_is_quoted() {
    let result = validate(r#"filter resource_attributes.k8s.namespace.name = "prod""#, None);
    assert_eq!(
        result.transformed_query.as_deref(),
        Some(r#"filter resource_attributes."k8s.namespace.name" = "prod""#)
    );

    let quoted = validate(r#"filter resource_attributes."k8s.namespace.name" = "prod""#, None);
    assert!(quoted.transformed_query.is_none());
}

#[test]
fn test_sort_minus_becomes_desc() {
    let result = validate("sort -count", None);
    assert_eq!(result.transformed_query.as_deref(), Some("sort desc(count)"));
}

#[test]
fn test_time_filter_depends_on_window() {
    let query = r#"filter timestamp > @"1 hour ago" | filter body ~ error"#;

    let with_window = validate(query, Some("1h"));
    assert!(with_window.is_valid);
    assert_eq!(with_window.transformed_query.as_deref(), Some("filter body ~ error"));
    assert!(with_window.transformations[0].contains("(removed)"));

    let without = validate(query, None);
    assert!(without.is_valid);
    assert!(without.transformed_query.is_none());
}

#[test]
fn test_unknown_verb_lists_real_verb() {
    let result = validate("filter a = 1 | sortt desc(a)", None);
    assert!(!result.is_valid);
    let message = result.error_message.unwrap();
    assert!(message.contains("stage 2"));
    assert!(message.contains("sort"));
}

#[test]
fn test_stage_limit_message() {
    let query = vec!["limit 1"; 25].join(" | ");
    let result = validate(&query, None);
    assert!(!result.is_valid);
    assert_eq!(
        result.error_message.as_deref(),
        Some("Query has 25 pipeline stages, exceeding the maximum of 20")
    );
}

#[test]
fn test_ambiguous_metric_is_left_alone() {
    let result = validate(r#"filter m("a") > m("b")"#, None);
    assert!(result.transformed_query.is_none());
    assert!(result.transformations.is_empty());
}

#[test]
fn test_metric_and_count_if_repairs_validate() {
    let metric = validate(r#"filter m("cpu_usage") > 80"#, None);
    assert!(metric.is_valid, "{:?}", metric.error_message);
    assert!(metric.transformed_query.unwrap().starts_with("align cpu_usage:avg("));

    let count = validate("statsby errors:count_if(status >= 500), group_by(service)", None);
    assert!(count.is_valid, "{:?}", count.error_message);
    assert_eq!(
        count.effective_query("unused"),
        "make_col errors_flag:if(status >= 500, 1, 0) | statsby errors:sum(errors_flag), group_by(service)"
    );
}

#[test]
fn test_rewrite_can_still_be_invalid() {
    let result = validate("sort -count | where x = 1", None);
    assert!(!result.is_valid);
    assert_eq!(result.transformed_query.as_deref(), Some("sort desc(count) | where x = 1"));
    assert_eq!(result.transformations.len(), 1);
    assert!(result.error_message.unwrap().contains("'where'"));
}

#[test]
fn test_fixed_point_rounds_from_config() {
    let config = OpalValidatorConfig {
        pass_rounds: 3,
        ..Default::default()
    };
    let validator = OpalValidator::new(config).unwrap();
    let result = validator.validate("sort -a | filter body ~ <x y>", None);
    assert!(result.is_valid);
    assert_eq!(result.transformations.len(), 2);
}

#[test]
fn test_metrics_over_batch() {
    let validator = OpalValidator::default();
    let results = validator.validate_batch(
        &["limit 5", "sort -a", "filter (a", "sort -b | bogus"],
        None,
    );
    let metrics = OpalValidationMetrics::compute(&results);
    assert_eq!(metrics.total_queries, 4);
    assert_eq!(metrics.valid_queries, 2);
    assert_eq!(metrics.auto_fixed_queries, 2);
    assert_eq!(metrics.auto_fixed_valid_queries, 1);
    assert!((metrics.fix_rate - 0.5).abs() < f64::EPSILON);
}

fn field() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn clean_stage() -> impl Strategy<Value = String> {
    prop_oneof![
        (field(), 0u32..1000).prop_map(|(f, n)| format!("filter {f} = {n}")),
        (field(), 0u32..1000).prop_map(|(f, n)| format!("filter {f} > {n}")),
        (field(), "[a-z ]{0,12}").prop_map(|(f, w)| format!("filter {f} = \"{w}\"")),
        field().prop_map(|f| format!("statsby n:count(), group_by({f})")),
        field().prop_map(|f| format!("sort desc({f})")),
        (1u32..500).prop_map(|n| format!("limit {n}")),
        field().prop_map(|f| format!("make_col {f}:strlen(name)")),
    ]
}

fn fixable_stage() -> impl Strategy<Value = String> {
    prop_oneof![
        field().prop_map(|f| format!("sort -{f}")),
        ("[a-z]{3,8}", "[a-z]{3,8}").prop_map(|(a, b)| format!("filter body ~ <{a} {b}>")),
        "[a-z]{1,8}".prop_map(|w| format!("filter resource_attributes.k8s.pod.name = \"{w}\"")),
        field().prop_map(|f| format!("statsby {f}:count_if(code >= 500)")),
        Just(r#"filter timestamp > @"1 hour ago""#.to_string()),
        Just(r#"filter m("cpu") > 80"#.to_string()),
    ]
}

#[test]
fn test_non_ascii_query_text_is_handled() {
    let result = validate(r#"statsby p:émax(m("cpu"))"#, None);
    assert!(!result.is_valid);
    assert!(result.transformations.is_empty());
    assert_eq!(result.error_message.as_deref(), Some("Unknown function 'émax'."));

    let result = validate(r#"filter service = "café" | sort -duration"#, None);
    assert!(result.is_valid, "{:?}", result.error_message);
    assert_eq!(
        result.transformed_query.as_deref(),
        Some(r#"filter service = "café" | sort desc(duration)"#)
    );
}

proptest! {
    #[test]
    fn test_arbitrary_text_never_panics(query in "\\PC{0,64}", window in prop_oneof![Just(None), Just(Some("1h"))]) {
        let result = validate(&query, window);
        prop_assert!(result.is_valid || result.error_message.is_some());
    }

    #[test]
    fn test_clean_queries_are_valid_and_untouched(
        stages in prop::collection::vec(clean_stage(), 1..=20)
    ) {
        let query = stages.join(" | ");
        let result = validate(&query, None);
        prop_assert!(result.is_valid, "{query}: {:?}", result.error_message);
        prop_assert_eq!(result.transformed_query, None);
        prop_assert!(result.transformations.is_empty());
    }

    #[test]
    fn test_revalidating_a_rewrite_changes_nothing(
        stages in prop::collection::vec(prop_oneof![clean_stage(), fixable_stage()], 1..=8),
        window in prop_oneof![Just(None), Just(Some("1h"))],
    ) {
        let query = stages.join(" | ");
        let first = validate(&query, window);
        if let Some(rewritten) = first.transformed_query {
            let second = validate(&rewritten, window);
            prop_assert!(second.transformations.is_empty(), "{rewritten}: {:?}", second.transformations);
            prop_assert_eq!(second.transformed_query, None);
        }
    }
}
