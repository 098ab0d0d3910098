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

//! Normalizes shell and SQL sort keys (`sort -count`, `sort count desc`) into
//! OPAL's call form (`sort desc(count)`).

use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::scan;
use crate::pass::{OpalPassContext, OpalPassOutcome, OpalRewrite};
use crate::passes::{splice, split_top_level, stage_verb};

pub const NAME: &str = "sort_syntax";

const RATIONALE: &str = "OPAL sorts with asc(field) and desc(field); a leading minus or a \
     trailing ASC/DESC keyword is not sort syntax.";

const FIELD: &str = r#"[A-Za-z_][A-Za-z0-9_]*(?:\.(?:[A-Za-z_][A-Za-z0-9_]*|"[^"]*"))*"#;

fn minus_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^-\s*({FIELD})$")).expect("valid sort key pattern"))
}

fn suffix_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^({FIELD})\s+(?i:(asc|desc))$")).expect("valid sort key pattern")
    })
}

fn normalize_key(key: &str) -> Option<String> {
    if let Some(caps) = minus_key().captures(key) {
        return Some(format!("desc({})", &caps[1]));
    }
    if let Some(caps) = suffix_key().captures(key) {
        let direction = caps[2].to_ascii_lowercase();
        return Some(format!("{direction}({})", &caps[1]));
    }
    None
}

pub fn apply(query: &str, _ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
    let scanned = scan(query);
    let mut edits = Vec::new();
    let mut rewrites = Vec::new();

    for stage in &scanned.stages {
        if stage_verb(query, stage) != Some("sort") {
            continue;
        }
        let args = stage.start + "sort".len()..stage.end;
        let keys = split_top_level(query, &scanned, args, b',');
        if keys.is_empty() {
            continue;
        }

        let mut changed = false;
        let normalized: Vec<String> = keys
            .iter()
            .map(|key| {
                let text = &query[key.clone()];
                match normalize_key(text) {
                    Some(fixed) => {
                        changed = true;
                        fixed
                    }
                    None => text.to_string(),
                }
            })
            .collect();

        if changed {
            let replacement = format!("sort {}", normalized.join(", "));
            rewrites.push(OpalRewrite::new(&query[stage.clone()], replacement.clone()));
            edits.push((stage.clone(), replacement));
        }
    }

    if edits.is_empty() {
        return OpalPassOutcome::unchanged(query);
    }
    OpalPassOutcome::rewritten(splice(query, edits), NAME, rewrites, RATIONALE)
}
