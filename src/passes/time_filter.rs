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

//! Removes timestamp filters that duplicate the declared time window.
//!
//! Only runs when the caller declared a window. A stage is removed when it is
//! exactly a `filter` comparing a well-known timestamp column against a
//! relative time (`@"1 hour ago"`, `now() - 1h`). The surrounding separators
//! are stitched back together so no empty or doubled stage is left behind.
//! A query made only of such filters is kept as written.

use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::scan;
use crate::pass::{OpalPassContext, OpalPassOutcome, OpalRewrite};

pub const NAME: &str = "time_filter";

/// Column names that carry the event time.
pub const TIMESTAMP_FIELDS: &[&str] = &[
    "timestamp",
    "time",
    "_time",
    "event_time",
    "start_time",
    "end_time",
    "valid_from",
    "BUNDLE_TIMESTAMP",
    "OBSERVATION_TIMESTAMP",
];

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r#"^filter\s+({})\s*>=?\s*(?:@"[^"]*\bago\b[^"]*"|@'[^']*\bago\b[^']*'|(?:now|query_end_time)\(\)\s*-\s*\d+(?:\.\d+)?\s*[A-Za-z]+)$"#,
            TIMESTAMP_FIELDS.join("|")
        );
        Regex::new(&pattern).expect("valid time filter pattern")
    })
}

pub fn apply(query: &str, ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
    let Some(window) = ctx.declared_window() else {
        return OpalPassOutcome::unchanged(query);
    };

    let scanned = scan(query);
    let stages = &scanned.stages;
    let keep: Vec<bool> = stages
        .iter()
        .map(|stage| !pattern().is_match(&query[stage.clone()]))
        .collect();

    if keep.iter().all(|kept| *kept) || keep.iter().all(|kept| !*kept) {
        return OpalPassOutcome::unchanged(query);
    }

    let mut out = String::with_capacity(query.len());
    out.push_str(&query[..stages[0].start]);
    let mut previous_kept: Option<usize> = None;
    for (idx, stage) in stages.iter().enumerate() {
        if !keep[idx] {
            continue;
        }
        if let Some(prev) = previous_kept {
            // Reuse the separator text that followed the previous kept stage.
            out.push_str(&query[stages[prev].end..stages[prev + 1].start]);
        }
        out.push_str(&query[stage.clone()]);
        previous_kept = Some(idx);
    }
    if let Some(last) = stages.last() {
        out.push_str(&query[last.end..]);
    }

    let rewrites = stages
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(stage, _)| OpalRewrite::new(&query[stage.clone()], ""))
        .collect();
    let rationale = format!(
        "the declared time window ({window}) already bounds the query, so an explicit \
         timestamp filter is redundant."
    );
    OpalPassOutcome::rewritten(out, NAME, rewrites, rationale)
}
