//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Wraps bare metric selection in an `align` stage.
//!
//! `m("cpu")` and `m_tdigest("latency")` only produce values inside `align`.
//! Two shapes are repaired, and only when the query holds exactly one metric
//! call and no `align` stage:
//!
//! - a bare call compared in a `filter`:
//!   `filter m("cpu") > 80` becomes
//!   `align cpu:avg(m("cpu")) | filter cpu > 80`
//! - an aggregate wrapped directly around the call in an aggregation stage:
//!   `statsby peak:max(m("cpu")), group_by(host)` becomes
//!   `align cpu:max(m("cpu")) | aggregate peak:max(cpu), group_by(host)`
//!
//! Anything else is left for the validator to report.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::{scan, OpalScan};
use crate::pass::{OpalPassContext, OpalPassOutcome, OpalRewrite};
use crate::passes::{continues_path, matching_paren, paren_depth, splice, stage_verb};
use crate::reference::{
    reference_tables, AGGREGATION_STAGE_VERBS, METRIC_SELECTORS, METRIC_WRAPPER_VERB,
};

pub const NAME: &str = "metric_pipeline";

const RATIONALE: &str = "metric selection with m() only yields values inside an align stage, \
     so the metric is aligned first and later stages use the aligned column.";

fn selector_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(m_tdigest|m)\s*\(").expect("valid metric call pattern"))
}

fn metric_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*(?:"([^"]+)"|'([^']+)')\s*$"#).expect("valid metric name pattern")
    })
}

/// One metric selector call located in the query.
struct MetricCall<'q> {
    selector: &'q str,
    span: Range<usize>,
    name: &'q str,
}

/// Column name for an aligned metric: identifier-safe, never starting with a digit.
fn aligned_field(metric: &str) -> String {
    let cleaned: String = metric
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() || cleaned.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("metric_{cleaned}")
    } else {
        cleaned.to_string()
    }
}

fn locate_calls<'q>(query: &'q str, scanned: &OpalScan) -> Vec<(Range<usize>, &'q str, usize)> {
    selector_call()
        .captures_iter(query)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let selector = caps.get(1)?;
            if scanned.in_literal(whole.start()) || continues_path(query, whole.start()) {
                return None;
            }
            Some((whole.start()..whole.end(), selector.as_str(), whole.end() - 1))
        })
        .collect()
}

/// The call `name(` whose argument list begins right before `pos`.
fn enclosing_call(query: &str, pos: usize) -> Option<(Range<usize>, usize)> {
    let before = query[..pos].trim_end();
    if !before.ends_with('(') {
        return None;
    }
    let open = before.len() - 1;
    let name_end = query[..open].trim_end().len();
    let name_start = match query[..name_end]
        .char_indices()
        .rev()
        .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '_'))
    {
        // A non-ASCII letter makes the whole word an unknown name.
        Some((_, ch)) if ch.is_alphanumeric() => return None,
        Some((idx, ch)) => idx + ch.len_utf8(),
        None => 0,
    };
    if name_start == name_end {
        return None;
    }
    Some((name_start..name_end, open))
}

pub fn apply(query: &str, _ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
    let scanned = scan(query);
    if scanned
        .stages
        .iter()
        .any(|stage| stage_verb(query, stage) == Some(METRIC_WRAPPER_VERB))
    {
        return OpalPassOutcome::unchanged(query);
    }

    let calls = locate_calls(query, &scanned);
    let [(head, selector, open)] = calls.as_slice() else {
        return OpalPassOutcome::unchanged(query);
    };
    let Some(close) = matching_paren(query, &scanned, *open) else {
        return OpalPassOutcome::unchanged(query);
    };
    let Some(name) = metric_name()
        .captures(&query[open + 1..close])
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
    else {
        return OpalPassOutcome::unchanged(query);
    };
    let call = MetricCall {
        selector: *selector,
        span: head.start..close + 1,
        name: name.as_str(),
    };
    let Some(stage) = scanned
        .stages
        .iter()
        .find(|stage| stage.contains(&call.span.start))
    else {
        return OpalPassOutcome::unchanged(query);
    };

    let rewritten = match stage_verb(query, stage) {
        Some("filter") => wrap_filter(query, &scanned, stage, &call),
        Some(verb) if AGGREGATION_STAGE_VERBS.contains(&verb) => {
            wrap_aggregate(query, &scanned, stage, verb, &call)
        }
        _ => None,
    };
    let Some(replacement) = rewritten else {
        return OpalPassOutcome::unchanged(query);
    };

    let rewrites = vec![OpalRewrite::new(&query[stage.clone()], replacement.clone())];
    let out = splice(query, vec![(stage.clone(), replacement)]);
    OpalPassOutcome::rewritten(out, NAME, rewrites, RATIONALE)
}

fn wrap_filter(
    query: &str,
    scanned: &OpalScan,
    stage: &Range<usize>,
    call: &MetricCall<'_>,
) -> Option<String> {
    if call.selector != "m" || paren_depth(query, scanned, stage.start, call.span.start) != 0 {
        return None;
    }
    let field = aligned_field(call.name);
    let call_text = &query[call.span.clone()];
    Some(format!(
        "align {field}:avg({call_text}) | {}{field}{}",
        &query[stage.start..call.span.start],
        &query[call.span.end..stage.end]
    ))
}

fn wrap_aggregate(
    query: &str,
    scanned: &OpalScan,
    stage: &Range<usize>,
    verb: &str,
    call: &MetricCall<'_>,
) -> Option<String> {
    let (agg_name, outer_open) = enclosing_call(query, call.span.start)?;
    if agg_name.start < stage.start {
        return None;
    }
    let aggregate = &query[agg_name.clone()];
    if METRIC_SELECTORS.contains(&aggregate) || !reference_tables().is_function(aggregate) {
        return None;
    }
    let outer_close = matching_paren(query, scanned, outer_open)?;
    // The metric call must be the aggregate's only argument.
    if !query[call.span.end..outer_close].trim().is_empty() {
        return None;
    }

    let field = aligned_field(call.name);
    let call_text = &query[call.span.clone()];
    let body_start = stage.start + verb.len();
    let verb = if verb == "statsby" { "aggregate" } else { verb };
    Some(format!(
        "align {field}:{aggregate}({call_text}) | {verb}{}{aggregate}({field}){}",
        &query[body_start..agg_name.start],
        &query[outer_close + 1..stage.end]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(query: &str) -> OpalPassOutcome {
        apply(query, &OpalPassContext::default())
    }

    #[test]
    fn wraps_bare_filter_call() {
        let outcome = run(r#"filter m("cpu_usage") > 80"#);
        assert_eq!(
            outcome.query,
            r#"align cpu_usage:avg(m("cpu_usage")) | filter cpu_usage > 80"#
        );
        assert!(outcome.fired());
    }

    #[test]
    fn wraps_aggregate_around_metric() {
        let outcome = run(r#"statsby peak:max(m("memory.used")), group_by(host) | limit 5"#);
        assert_eq!(
            outcome.query,
            r#"align memory_used:max(m("memory.used")) | aggregate peak:max(memory_used), group_by(host) | limit 5"#
        );
    }

    #[test]
    fn existing_align_is_untouched() {
        assert!(!run(r#"align cpu:avg(m("cpu")) | filter cpu > 80"#).fired());
    }

    #[test]
    fn several_metric_calls_are_ambiguous() {
        assert!(!run(r#"filter m("a") > m("b")"#).fired());
    }

    #[test]
    fn nested_filter_call_is_ambiguous() {
        assert!(!run(r#"filter abs(m("cpu")) > 80"#).fired());
    }

    #[test]
    fn metric_name_inside_string_is_ignored() {
        assert!(!run(r#"filter body = "m(\"cpu\")""#).fired());
    }

    #[test]
    fn non_ascii_aggregate_name_is_left_alone() {
        assert!(!run(r#"statsby p:émax(m("cpu"))"#).fired());
        let outcome = run(r#"statsby p: max(m("cpu")), label:"é""#);
        assert_eq!(
            outcome.query,
            r#"align cpu:max(m("cpu")) | aggregate p: max(cpu), label:"é""#
        );
    }

    #[test]
    fn aligned_field_is_identifier_safe() {
        assert_eq!(aligned_field("http.server.duration"), "http_server_duration");
        assert_eq!(aligned_field("5xx_rate"), "metric_5xx_rate");
        assert_eq!(aligned_field("..."), "metric_");
    }
}
