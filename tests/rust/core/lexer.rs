//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.

use opal_guard::lexer::{leading_identifier, scan, split_pipeline};

#[test]
fn test_split_keeps_regex_alternation_together() {
    let stages = split_pipeline(r#"filter path ~ /\/api\/(v1|v2)/ | statsby n:count(), group_by(path)"#);
    assert_eq!(stages.len(), 2);
    assert!(stages[0].ends_with('/'));
}

#[test]
fn test_split_regex_opened_after_argument_separator() {
    let stages = split_pipeline("make_col m:match_regex(body, /a|b/, 0) | limit 1");
    assert_eq!(stages, vec!["make_col m:match_regex(body, /a|b/, 0)", "limit 1"]);
}

#[test]
fn test_split_division_then_separator() {
    let stages = split_pipeline("make_col ratio:errors / total | filter ratio > 0.5");
    assert_eq!(stages, vec!["make_col ratio:errors / total", "filter ratio > 0.5"]);
}

#[test]
fn test_split_mixed_quotes() {
    let stages = split_pipeline(r#"filter a = "it's | fine" | filter b = 'say "x|y"'"#);
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[1], r#"filter b = 'say "x|y"'"#);
}

#[test]
fn test_split_multiline_query() {
    let stages = split_pipeline("filter a = 1\n| sort desc(a)\n\n| limit 3\n");
    assert_eq!(stages, vec!["filter a = 1", "sort desc(a)", "limit 3"]);
}

#[test]
fn test_split_empty_query() {
    assert!(split_pipeline("").is_empty());
    assert!(split_pipeline("   |  | ").is_empty());
}

#[test]
fn test_scan_reports_honoured_separators_only() {
    let query = r#"filter a = "|" | limit 1"#;
    let scanned = scan(query);
    assert_eq!(scanned.separators, vec![query.rfind('|').unwrap()]);
    assert_eq!(scanned.stages.len(), 2);
}

#[test]
fn test_scan_unterminated_string_swallows_rest() {
    let scanned = scan(r#"filter a = "open | limit 1"#);
    assert_eq!(scanned.stages.len(), 1);
    assert_eq!(scanned.double_quotes, 1);
}

#[test]
fn test_leading_identifier_of_stage() {
    assert_eq!(leading_identifier("statsby n:count()"), Some("statsby"));
    assert_eq!(leading_identifier("filter(a)"), Some("filter"));
    assert_eq!(leading_identifier("-x"), None);
}
