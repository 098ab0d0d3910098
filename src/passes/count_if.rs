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

//! Rewrites `label:count_if(cond)` into a flag column and a sum.
//!
//! OPAL has no conditional count. Inside an aggregation stage the call becomes
//! `label:sum(label_flag)` and the flag is derived just before the stage with
//! `make_col label_flag:if(cond, 1, 0)`. When the stage is already preceded by
//! a `make_col`, the flag is appended to it instead of adding a new stage.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::scan;
use crate::pass::{OpalPassContext, OpalPassOutcome, OpalRewrite};
use crate::passes::{continues_path, matching_paren, splice, stage_verb};
use crate::reference::AGGREGATION_STAGE_VERBS;

pub const NAME: &str = "count_if";

const DERIVATION_VERB: &str = "make_col";

const RATIONALE: &str = "OPAL has no count_if; the condition is materialized as a 0/1 flag \
     column and summed instead.";

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*:\s*count_if\s*\(").expect("valid count_if pattern")
    })
}

pub fn apply(query: &str, _ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
    let scanned = scan(query);
    let mut edits = Vec::new();
    let mut rewrites = Vec::new();
    // Flag derivations keyed by the index of the stage that needs them.
    let mut derivations: BTreeMap<usize, Vec<String>> = BTreeMap::new();

    for caps in pattern().captures_iter(query) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if scanned.in_literal(whole.start()) || continues_path(query, whole.start()) {
            continue;
        }
        let Some(stage_idx) = scanned
            .stages
            .iter()
            .position(|stage| stage.contains(&whole.start()))
        else {
            continue;
        };
        let in_aggregation = stage_verb(query, &scanned.stages[stage_idx])
            .is_some_and(|verb| AGGREGATION_STAGE_VERBS.contains(&verb));
        if !in_aggregation {
            continue;
        }
        let open = whole.end() - 1;
        let Some(close) = matching_paren(query, &scanned, open) else {
            continue;
        };
        let condition = query[open + 1..close].trim();
        if condition.is_empty() {
            continue;
        }

        let label = &caps[1];
        let flag = format!("{label}_flag");
        let derivation = format!("{flag}:if({condition}, 1, 0)");
        let aggregate = format!("{label}:sum({flag})");

        rewrites.push(OpalRewrite::new(
            &query[whole.start()..close + 1],
            format!("{DERIVATION_VERB} {derivation} | {aggregate}"),
        ));
        edits.push((whole.start()..close + 1, aggregate));
        derivations.entry(stage_idx).or_default().push(derivation);
    }

    for (stage_idx, derived) in derivations {
        let derived = derived.join(", ");
        let previous = stage_idx
            .checked_sub(1)
            .map(|idx| &scanned.stages[idx])
            .filter(|stage| stage_verb(query, stage) == Some(DERIVATION_VERB));
        match previous {
            Some(stage) => edits.push((stage.end..stage.end, format!(", {derived}"))),
            None => {
                let start = scanned.stages[stage_idx].start;
                edits.push((start..start, format!("{DERIVATION_VERB} {derived} | ")));
            }
        }
    }

    if rewrites.is_empty() {
        return OpalPassOutcome::unchanged(query);
    }
    OpalPassOutcome::rewritten(splice(query, edits), NAME, rewrites, RATIONALE)
}
