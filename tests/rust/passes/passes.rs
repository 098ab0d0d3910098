//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.

use opal_guard::pass::OpalPassContext;
use opal_guard::passes::{bracket, count_if, metric, nested_field, sort, time_filter};
use opal_guard::pipeline::OpalPassPipeline;

fn no_window() -> OpalPassContext<'static> {
    OpalPassContext::default()
}

#[test]
fn test_bracket_three_terms() {
    let outcome = bracket::apply("filter log ~ <timeout refused reset>", &no_window());
    assert_eq!(
        outcome.query,
        r#"filter (contains(log, "timeout") or contains(log, "refused") or contains(log, "reset"))"#
    );
}

#[test]
fn test_bracket_is_idempotent() {
    let once = bracket::apply("filter body ~ <error exception>", &no_window()).query;
    let twice = bracket::apply(&once, &no_window());
    assert!(!twice.fired());
    assert_eq!(twice.query, once);
}

#[test]
fn test_nested_field_multiple_occurrences() {
    let outcome = nested_field::apply(
        "filter resource_attributes.k8s.pod.name = \"a\" | statsby n:count(), group_by(attributes.http.route)",
        &no_window(),
    );
    assert_eq!(
        outcome.query,
        "filter resource_attributes.\"k8s.pod.name\" = \"a\" | statsby n:count(), group_by(attributes.\"http.route\")"
    );
    assert_eq!(outcome.transformation.map(|t| t.rewrites.len()), Some(2));
}

#[test]
fn test_sort_keeps_non_sort_text() {
    let outcome = sort::apply("filter a > 1 | sort -a | limit 5", &no_window());
    assert_eq!(outcome.query, "filter a > 1 | sort desc(a) | limit 5");
}

#[test]
fn test_time_filter_needs_window() {
    let query = "filter event_time >= now() - 1h | limit 5";
    assert!(!time_filter::apply(query, &no_window()).fired());
    let outcome = time_filter::apply(query, &OpalPassContext::new(Some("1h")));
    assert_eq!(outcome.query, "limit 5");
}

#[test]
fn test_time_filter_ignores_absolute_times() {
    let query = r#"filter timestamp > @"2024-01-01T00:00:00Z" | limit 5"#;
    assert!(!time_filter::apply(query, &OpalPassContext::new(Some("1h"))).fired());
}

#[test]
fn test_metric_tdigest_in_aggregation() {
    let outcome = metric::apply(
        r#"timechart 5m, merged:tdigest_combine(m_tdigest("latency"))"#,
        &no_window(),
    );
    assert_eq!(
        outcome.query,
        r#"align latency:tdigest_combine(m_tdigest("latency")) | timechart 5m, merged:tdigest_combine(latency)"#
    );
}

#[test]
fn test_metric_filter_call_requires_m_selector() {
    assert!(!metric::apply(r#"filter m_tdigest("latency") > 1"#, &no_window()).fired());
}

#[test]
fn test_count_if_explanation_shows_both_stages() {
    let outcome = count_if::apply("statsby errs:count_if(code >= 500)", &no_window());
    let rendered = outcome.transformation.expect("fired").to_string();
    assert!(rendered.contains("`errs:count_if(code >= 500)`"));
    assert!(rendered.contains("make_col errs_flag:if(code >= 500, 1, 0) | errs:sum(errs_flag)"));
}

#[test]
fn test_default_pipeline_order_and_composition() {
    let query = "filter timestamp > @\"1 hour ago\" | filter resource_attributes.service.name = \"api\" and body ~ <error exception> | statsby errors:count_if(level = \"error\"), group_by(host) | sort -errors";
    let run = OpalPassPipeline::with_defaults().run(query, &OpalPassContext::new(Some("1h")));
    assert_eq!(
        run.query,
        "filter resource_attributes.\"service.name\" = \"api\" and (contains(body, \"error\") or contains(body, \"exception\")) | make_col errors_flag:if(level = \"error\", 1, 0) | statsby errors:sum(errors_flag), group_by(host) | sort desc(errors)"
    );
    let passes: Vec<&str> = run.transformations.iter().map(|t| t.pass).collect();
    assert_eq!(
        passes,
        vec!["nested_field", "bracket_terms", "time_filter", "sort_syntax", "count_if"]
    );
}
