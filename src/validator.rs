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

//! # Structural Validator
//!
//! Ordered structural checks over a query. The first failing check decides
//! the verdict; later checks never run.
//!
//! 1. `balanced_delimiters`: no string or regex literal is left open, and
//!    `(`/`)`, `[`/`]` and `{`/`}` counts match
//! 2. `quote_parity`: double quotes pair up
//! 3. `stage_count`: at most `max_stages` stages
//! 4. `nesting_depth`: delimiters nest at most `max_nesting_depth` deep
//! 5. `known_verbs`: every stage starts with a known verb
//! 6. `known_functions`: every call names a known function
//!
//! Text inside string and regex literals is ignored by every check.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::OpalValidatorConfig;
use crate::errors::{OpalError, Result};
use crate::lexer::{leading_identifier, scan, OpalScan};
use crate::reference::{reference_tables, CALL_KEYWORDS};

/// A query scanned once and shared by every check.
pub struct OpalQueryView<'q> {
    pub query: &'q str,
    pub scan: OpalScan,
}

impl<'q> OpalQueryView<'q> {
    pub fn new(query: &'q str) -> Self {
        OpalQueryView {
            query,
            scan: scan(query),
        }
    }

    pub fn stages(&self) -> impl Iterator<Item = &'q str> + '_ {
        let query = self.query;
        self.scan.stages.iter().map(move |range| &query[range.clone()])
    }

    /// Bytes outside literals, with their offsets.
    fn code_bytes(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.query
            .bytes()
            .enumerate()
            .filter(|(idx, _)| !self.scan.in_literal(*idx))
    }
}

pub type OpalCheckFn = fn(&OpalQueryView<'_>, &OpalValidatorConfig) -> Result<()>;

/// A named structural check.
#[derive(Clone, Copy)]
pub struct OpalCheck {
    pub name: &'static str,
    pub check: OpalCheckFn,
}

/// Structural checks in evaluation order.
pub const STRUCTURAL_CHECKS: [OpalCheck; 6] = [
    OpalCheck {
        name: "balanced_delimiters",
        check: check_balanced_delimiters,
    },
    OpalCheck {
        name: "quote_parity",
        check: check_quote_parity,
    },
    OpalCheck {
        name: "stage_count",
        check: check_stage_count,
    },
    OpalCheck {
        name: "nesting_depth",
        check: check_nesting_depth,
    },
    OpalCheck {
        name: "known_verbs",
        check: check_known_verbs,
    },
    OpalCheck {
        name: "known_functions",
        check: check_known_functions,
    },
];

/// Runs every structural check against `query`, stopping at the first failure.
pub fn validate_structure(query: &str, config: &OpalValidatorConfig) -> Result<()> {
    let view = OpalQueryView::new(query);
    for check in &STRUCTURAL_CHECKS {
        if let Err(err) = (check.check)(&view, config) {
            log::debug!("check '{}' rejected query: {err}", check.name);
            return Err(err);
        }
    }
    Ok(())
}

const DELIMITERS: [(u8, u8, &str); 3] = [
    (b'(', b')', "parentheses"),
    (b'[', b']', "brackets"),
    (b'{', b'}', "braces"),
];

fn check_balanced_delimiters(view: &OpalQueryView<'_>, _config: &OpalValidatorConfig) -> Result<()> {
    if let Some((delimiter, offset)) = view.scan.open_literal {
        let kind = if delimiter == '/' { "regex literal" } else { "single-quoted string" };
        return Err(OpalError::structural(format!(
            "Unterminated {kind}: '{delimiter}' at offset {offset} is never closed"
        )));
    }
    for (open, close, label) in DELIMITERS {
        let (opened, closed) = view
            .code_bytes()
            .fold((0usize, 0usize), |(o, c), (_, byte)| {
                (o + usize::from(byte == open), c + usize::from(byte == close))
            });
        if opened != closed {
            return Err(OpalError::structural(format!(
                "Unbalanced {label}: {opened} opening '{}' vs {closed} closing '{}'",
                open as char, close as char
            )));
        }
    }
    Ok(())
}

fn check_quote_parity(view: &OpalQueryView<'_>, _config: &OpalValidatorConfig) -> Result<()> {
    let count = view.scan.double_quotes;
    if count % 2 != 0 {
        return Err(OpalError::structural(format!(
            "Unbalanced double quotes: found {count} unescaped '\"' characters"
        )));
    }
    Ok(())
}

fn check_stage_count(view: &OpalQueryView<'_>, config: &OpalValidatorConfig) -> Result<()> {
    let stages = view.scan.stages.len();
    if stages > config.max_stages {
        return Err(OpalError::complexity(format!(
            "Query has {stages} pipeline stages, exceeding the maximum of {}",
            config.max_stages
        )));
    }
    Ok(())
}

/// Deepest delimiter nesting outside literals.
pub fn nesting_depth(view: &OpalQueryView<'_>) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    for (_, byte) in view.code_bytes() {
        match byte {
            b'(' | b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn check_nesting_depth(view: &OpalQueryView<'_>, config: &OpalValidatorConfig) -> Result<()> {
    let depth = nesting_depth(view);
    if depth > config.max_nesting_depth {
        return Err(OpalError::complexity(format!(
            "Query nesting depth {depth} exceeds the maximum of {}",
            config.max_nesting_depth
        )));
    }
    Ok(())
}

fn check_known_verbs(view: &OpalQueryView<'_>, config: &OpalValidatorConfig) -> Result<()> {
    let tables = reference_tables();
    for (idx, stage) in view.stages().enumerate() {
        match leading_identifier(stage) {
            Some(verb) if tables.is_verb(verb) => {}
            Some(verb) => {
                return Err(OpalError::UnknownVerb {
                    verb: verb.to_string(),
                    stage: idx + 1,
                    suggestions: tables.suggest_verbs(verb, config.max_suggestions),
                })
            }
            None => {
                let token = stage.split_whitespace().next().unwrap_or(stage);
                return Err(OpalError::UnknownVerb {
                    verb: token.to_string(),
                    stage: idx + 1,
                    suggestions: Vec::new(),
                });
            }
        }
    }
    Ok(())
}

fn call_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([\p{Alphabetic}_]\w*)\s*\(").expect("valid call pattern"))
}

fn check_known_functions(view: &OpalQueryView<'_>, config: &OpalValidatorConfig) -> Result<()> {
    let tables = reference_tables();
    for caps in call_pattern().captures_iter(view.query) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        if view.scan.in_literal(name.start()) {
            continue;
        }
        // `a.b(` is a path segment followed by a group, not a call.
        if name.start() > 0 && view.query.as_bytes()[name.start() - 1] == b'.' {
            continue;
        }
        let function = name.as_str();
        if tables.is_function(function)
            || tables.is_verb(function)
            || CALL_KEYWORDS.contains(&function.to_ascii_lowercase().as_str())
        {
            continue;
        }
        let hint = tables.hint_for(function).map(str::to_string);
        let suggestions = if hint.is_some() {
            Vec::new()
        } else {
            tables.suggest_functions(function, config.max_suggestions)
        };
        return Err(OpalError::UnknownFunction {
            function: function.to_string(),
            hint,
            suggestions,
        });
    }
    Ok(())
}
