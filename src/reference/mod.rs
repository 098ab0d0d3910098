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

//! # Reference Tables
//!
//! Whitelists of OPAL verbs and functions, plus hints for SQL-style function
//! names that authors commonly reach for.
//!
//! The tables are built once per process behind a [`OnceLock`] and are never
//! mutated afterwards, so concurrent validations read them without locking.
//!
//! ## Suggestions
//!
//! When a name is unknown, lookalikes are the entries sharing the longest
//! leading prefix with it (at least three characters, or two when nothing
//! shares three). Ties are broken alphabetically so suggestions are stable.

pub mod functions;
pub mod hints;
pub mod verbs;

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Verbs whose arguments are aggregate expressions.
pub const AGGREGATION_STAGE_VERBS: &[&str] = &["statsby", "timechart", "timestats", "aggregate"];

/// Verb that wraps metric selection.
pub const METRIC_WRAPPER_VERB: &str = "align";

/// Functions that select a metric and must appear inside the wrapper verb.
pub const METRIC_SELECTORS: &[&str] = &["m", "m_tdigest"];

/// Words that may be followed by `(` without being a function call.
pub const CALL_KEYWORDS: &[&str] = &["and", "or", "not", "in"];

/// Process-wide whitelist of verbs, functions and disallowed-name hints.
#[derive(Debug)]
pub struct OpalReferenceTables {
    verbs: BTreeSet<&'static str>,
    functions: BTreeSet<&'static str>,
    hints: HashMap<&'static str, &'static str>,
}

static TABLES: OnceLock<OpalReferenceTables> = OnceLock::new();

/// Returns the shared reference tables, building them on first use.
pub fn reference_tables() -> &'static OpalReferenceTables {
    TABLES.get_or_init(OpalReferenceTables::build)
}

impl OpalReferenceTables {
    fn build() -> Self {
        let verbs = [
            verbs::FILTER_VERBS,
            verbs::PROJECTION_VERBS,
            verbs::AGGREGATION_VERBS,
            verbs::JOIN_VERBS,
            verbs::SHAPING_VERBS,
            verbs::METADATA_VERBS,
            verbs::SPECIALIZED_VERBS,
        ]
        .concat()
        .into_iter()
        .collect();

        let functions = [
            functions::AGGREGATE_FUNCTIONS,
            functions::WINDOW_FUNCTIONS,
            functions::METRIC_FUNCTIONS,
            functions::STRING_FUNCTIONS,
            functions::REGEX_FUNCTIONS,
            functions::ENCODING_FUNCTIONS,
            functions::MATH_FUNCTIONS,
            functions::TYPE_FUNCTIONS,
            functions::TIME_FUNCTIONS,
            functions::COLLECTION_FUNCTIONS,
            functions::CONDITIONAL_FUNCTIONS,
            functions::NETWORK_FUNCTIONS,
            functions::ARGUMENT_FUNCTIONS,
            functions::MISC_FUNCTIONS,
        ]
        .concat()
        .into_iter()
        .collect();

        let hints = hints::DISALLOWED_FUNCTIONS.iter().copied().collect();

        OpalReferenceTables {
            verbs,
            functions,
            hints,
        }
    }

    pub fn is_verb(&self, name: &str) -> bool {
        self.verbs.contains(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// Hint for a known SQL-style name that OPAL does not support.
    pub fn hint_for(&self, name: &str) -> Option<&'static str> {
        self.hints.get(name).copied()
    }

    pub fn verb_count(&self) -> usize {
        self.verbs.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn suggest_verbs(&self, name: &str, limit: usize) -> Vec<String> {
        suggest(&self.verbs, name, limit)
    }

    pub fn suggest_functions(&self, name: &str, limit: usize) -> Vec<String> {
        suggest(&self.functions, name, limit)
    }
}

fn suggest(candidates: &BTreeSet<&'static str>, name: &str, limit: usize) -> Vec<String> {
    let name = name.to_ascii_lowercase();
    for threshold in [3usize, 2] {
        let threshold = threshold.min(name.len());
        if threshold == 0 {
            break;
        }
        let mut ranked: Vec<(usize, &str)> = candidates
            .iter()
            .map(|candidate| (common_prefix_len(&name, candidate), *candidate))
            .filter(|(shared, _)| *shared >= threshold)
            .collect();
        if ranked.is_empty() {
            continue;
        }
        // BTreeSet iteration is already alphabetical; a stable sort keeps that
        // order among equal prefix lengths.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        return ranked
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect();
    }
    Vec::new()
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
