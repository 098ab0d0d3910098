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

//! Expands multi-term search brackets into an explicit OR chain.
//!
//! `body ~ <error exception>` is read by the backend as "contains all terms",
//! which is rarely what a generated query means. The bracket is rewritten to
//! `(contains(body, "error") or contains(body, "exception"))`. A single-term
//! bracket is unambiguous and is left alone.

use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::scan;
use crate::pass::{OpalPassContext, OpalPassOutcome, OpalRewrite};
use crate::passes::{continues_path, splice};

pub const NAME: &str = "bracket_terms";

const RATIONALE: &str = "a multi-term <...> search is ambiguous between AND and OR; each term \
     is now an explicit contains() joined with or.";

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_][A-Za-z0-9_]*(?:\.(?:[A-Za-z_][A-Za-z0-9_]*|"[^"]*"))*)\s*~\s*<([^<>]*)>"#,
        )
        .expect("valid bracket pattern")
    })
}

/// Splits bracket contents on whitespace, keeping double-quoted phrases whole.
fn terms(inner: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in inner.chars() {
        match ch {
            '"' => {
                if quoted {
                    terms.push(std::mem::take(&mut current));
                }
                quoted = !quoted;
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms.retain(|term| !term.is_empty());
    terms
}

fn quote(term: &str) -> String {
    format!("\"{}\"", term.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn apply(query: &str, _ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
    let scanned = scan(query);
    let mut edits = Vec::new();
    let mut rewrites = Vec::new();

    for caps in pattern().captures_iter(query) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if scanned.in_literal(whole.start()) || continues_path(query, whole.start()) {
            continue;
        }
        let terms = terms(&caps[2]);
        if terms.len() < 2 {
            continue;
        }

        let field = &caps[1];
        let chain: Vec<String> = terms
            .iter()
            .map(|term| format!("contains({field}, {})", quote(term)))
            .collect();
        let replacement = format!("({})", chain.join(" or "));
        rewrites.push(OpalRewrite::new(whole.as_str(), replacement.clone()));
        edits.push((whole.range(), replacement));
    }

    if edits.is_empty() {
        return OpalPassOutcome::unchanged(query);
    }
    OpalPassOutcome::rewritten(splice(query, edits), NAME, rewrites, RATIONALE)
}
