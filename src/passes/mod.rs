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

//! # Built-in Rewrite Passes
//!
//! Each submodule repairs one class of mistake commonly found in generated
//! OPAL queries. [`DEFAULT_PASSES`] lists them in the order they must run:
//! later passes assume the structure produced by earlier ones.
//!
//! | order | pass             | repairs                                        |
//! |-------|------------------|------------------------------------------------|
//! | 1     | `metric_pipeline`| `m("x")` used without an `align` stage         |
//! | 2     | `nested_field`   | unquoted dotted attribute keys                 |
//! | 3     | `bracket_terms`  | `field ~ <a b>` with several terms             |
//! | 4     | `time_filter`    | timestamp filters made redundant by the window |
//! | 5     | `sort_syntax`    | `sort -field`                                  |
//! | 6     | `count_if`       | `label:count_if(cond)`                         |

pub mod bracket;
pub mod count_if;
pub mod metric;
pub mod nested_field;
pub mod sort;
pub mod time_filter;

use std::ops::Range;

use crate::lexer::{leading_identifier, OpalScan};
use crate::pass::OpalPass;

/// Built-in passes in execution order.
pub const DEFAULT_PASSES: [OpalPass; 6] = [
    OpalPass {
        name: metric::NAME,
        apply: metric::apply,
    },
    OpalPass {
        name: nested_field::NAME,
        apply: nested_field::apply,
    },
    OpalPass {
        name: bracket::NAME,
        apply: bracket::apply,
    },
    OpalPass {
        name: time_filter::NAME,
        apply: time_filter::apply,
    },
    OpalPass {
        name: sort::NAME,
        apply: sort::apply,
    },
    OpalPass {
        name: count_if::NAME,
        apply: count_if::apply,
    },
];

/// Names of the built-in passes, in execution order.
pub fn pass_names() -> Vec<&'static str> {
    DEFAULT_PASSES.iter().map(|pass| pass.name).collect()
}

/// Verb of the stage spanning `range`.
pub(crate) fn stage_verb<'q>(query: &'q str, range: &Range<usize>) -> Option<&'q str> {
    leading_identifier(&query[range.clone()])
}

/// Index of the `)` closing the `(` at `open`, skipping literals.
pub(crate) fn matching_paren(query: &str, scan: &OpalScan, open: usize) -> Option<usize> {
    let bytes = query.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (idx, byte) in bytes.iter().enumerate().skip(open) {
        if scan.in_literal(idx) {
            continue;
        }
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parenthesis depth at `pos`, counted from `start`, skipping literals.
pub(crate) fn paren_depth(query: &str, scan: &OpalScan, start: usize, pos: usize) -> i64 {
    query.as_bytes()[start..pos]
        .iter()
        .enumerate()
        .filter(|(offset, _)| !scan.in_literal(start + offset))
        .fold(0i64, |depth, (_, byte)| match byte {
            b'(' => depth + 1,
            b')' => depth - 1,
            _ => depth,
        })
}

/// Splits `range` on `sep` where it appears outside literals and brackets.
/// Pieces are trimmed; empty pieces are dropped.
pub(crate) fn split_top_level(
    query: &str,
    scan: &OpalScan,
    range: Range<usize>,
    sep: u8,
) -> Vec<Range<usize>> {
    let bytes = query.as_bytes();
    let mut pieces = Vec::new();
    let mut depth = 0i64;
    let mut start = range.start;
    for idx in range.clone() {
        if scan.in_literal(idx) {
            continue;
        }
        match bytes[idx] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            byte if byte == sep && depth == 0 => {
                pieces.push(start..idx);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(start..range.end);
    pieces
        .into_iter()
        .filter_map(|piece| trim_range(query, piece))
        .collect()
}

/// Applies non-overlapping edits, given in any order, to `text`.
pub(crate) fn splice(text: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| (range.start, range.end));
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        if range.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Whether the byte before `pos` could continue an identifier or a path.
pub(crate) fn continues_path(query: &str, pos: usize) -> bool {
    pos > 0
        && matches!(
            query.as_bytes()[pos - 1],
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'.'
        )
}

fn trim_range(query: &str, range: Range<usize>) -> Option<Range<usize>> {
    let text = &query[range.clone()];
    let lead = text.len() - text.trim_start().len();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(range.start + lead..range.start + lead + trimmed.len())
    }
}
