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

//! # Lexical Scanner
//!
//! Splits an OPAL query into its top-level pipeline stages. A `|` only
//! separates stages when it sits outside every literal context:
//!
//! - double-quoted strings (`"a | b"`)
//! - single-quoted strings (`'a | b'`)
//! - regex literals (`body ~ /GET|POST/i`)
//!
//! A `/` opens a regex literal only when the preceding non-whitespace
//! character is a match or comparison operator, an argument position (`(` or
//! `,`), or the start of the query. Anywhere else it is division and is left
//! alone. A closing `/` may be followed by a run of flag letters (`i`, `m`,
//! `s`, `U`); any other identifier right after it is ordinary code. A backslash consumes the following character literally, so escaped
//! quotes and slashes never change state.
//!
//! The scanner also reports which bytes belong to a literal. Rewrite passes use
//! that mask to avoid touching text inside strings and regexes.

use std::ops::Range;

/// Characters after which a `/` starts a regex literal.
const REGEX_OPENERS: &[char] = &['~', '=', '(', ','];

/// Letters accepted as trailing regex flags.
const REGEX_FLAGS: &[char] = &['i', 'm', 's', 'U'];

/// Result of a single scan over a query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpalScan {
    /// Byte ranges of non-empty stages, trimmed of surrounding whitespace.
    pub stages: Vec<Range<usize>>,
    /// Byte offsets of the separators that were honoured, in order.
    pub separators: Vec<usize>,
    /// One flag per byte: `true` when the byte is part of a string or regex literal.
    pub literal: Vec<bool>,
    /// Unescaped `"` characters that opened or closed a double-quoted string.
    pub double_quotes: usize,
    /// Opening delimiter and offset of a single-quoted string or regex
    /// literal still open at the end of the query.
    pub open_literal: Option<(char, usize)>,
}

impl OpalScan {
    /// Whether the byte at `offset` lies inside a literal.
    pub fn in_literal(&self, offset: usize) -> bool {
        self.literal.get(offset).copied().unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LiteralState {
    Code,
    Double,
    Single,
    Regex,
}

/// Runs the scanner state machine over `query`.
pub fn scan(query: &str) -> OpalScan {
    let mut literal = vec![false; query.len()];
    let mut separators = Vec::new();
    let mut state = LiteralState::Code;
    let mut escaped = false;
    let mut double_quotes = 0;
    let mut last_significant: Option<char> = None;
    let mut literal_start = 0;
    let mut flag_bytes = 0;

    for (idx, ch) in query.char_indices() {
        let width = ch.len_utf8();

        if flag_bytes > 0 {
            mark(&mut literal, idx, width);
            flag_bytes -= width;
            continue;
        }

        if escaped {
            escaped = false;
            if state != LiteralState::Code {
                mark(&mut literal, idx, width);
            }
            if !ch.is_whitespace() {
                last_significant = Some(ch);
            }
            continue;
        }

        if ch == '\\' {
            escaped = true;
            if state != LiteralState::Code {
                mark(&mut literal, idx, width);
            }
            continue;
        }

        match state {
            LiteralState::Code => match ch {
                '"' => {
                    state = LiteralState::Double;
                    double_quotes += 1;
                    mark(&mut literal, idx, width);
                }
                '\'' => {
                    state = LiteralState::Single;
                    literal_start = idx;
                    mark(&mut literal, idx, width);
                }
                '/' if opens_regex(last_significant) => {
                    state = LiteralState::Regex;
                    literal_start = idx;
                    mark(&mut literal, idx, width);
                }
                '|' => separators.push(idx),
                _ => {}
            },
            LiteralState::Double => {
                mark(&mut literal, idx, width);
                if ch == '"' {
                    state = LiteralState::Code;
                    double_quotes += 1;
                }
            }
            LiteralState::Single => {
                mark(&mut literal, idx, width);
                if ch == '\'' {
                    state = LiteralState::Code;
                }
            }
            LiteralState::Regex => {
                mark(&mut literal, idx, width);
                if ch == '/' {
                    state = LiteralState::Code;
                    flag_bytes = regex_flags_len(&query[idx + width..]);
                }
            }
        }

        if !ch.is_whitespace() {
            last_significant = Some(ch);
        }
    }

    let open_literal = match state {
        LiteralState::Single => Some(('\'', literal_start)),
        LiteralState::Regex => Some(('/', literal_start)),
        LiteralState::Code | LiteralState::Double => None,
    };

    let mut stages = Vec::with_capacity(separators.len() + 1);
    let mut start = 0;
    for &sep in separators.iter().chain(std::iter::once(&query.len())) {
        if let Some(range) = trimmed(query, start..sep) {
            stages.push(range);
        }
        start = (sep + 1).min(query.len());
    }

    OpalScan {
        stages,
        separators,
        literal,
        double_quotes,
        open_literal,
    }
}

/// Splits `query` into trimmed, non-empty top-level pipeline stages.
pub fn split_pipeline(query: &str) -> Vec<String> {
    scan(query)
        .stages
        .into_iter()
        .map(|range| query[range].to_string())
        .collect()
}

/// Returns the leading identifier of a stage, if it starts with one.
pub fn leading_identifier(stage: &str) -> Option<&str> {
    let stage = stage.trim_start();
    let end = stage
        .char_indices()
        .find(|(idx, ch)| {
            !(ch.is_ascii_alphanumeric() || *ch == '_') || (*idx == 0 && ch.is_ascii_digit())
        })
        .map(|(idx, _)| idx)
        .unwrap_or(stage.len());
    if end == 0 {
        None
    } else {
        Some(&stage[..end])
    }
}

fn opens_regex(last_significant: Option<char>) -> bool {
    match last_significant {
        None => true,
        Some(ch) => REGEX_OPENERS.contains(&ch),
    }
}

/// Length of the flag run right after a closing `/`, or 0 when the
/// following identifier is not made of flag letters.
fn regex_flags_len(rest: &str) -> usize {
    let run = rest
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len());
    if rest[..run].chars().all(|ch| REGEX_FLAGS.contains(&ch)) {
        run
    } else {
        0
    }
}

fn mark(literal: &mut [bool], idx: usize, width: usize) {
    for flag in &mut literal[idx..idx + width] {
        *flag = true;
    }
}

fn trimmed(query: &str, range: Range<usize>) -> Option<Range<usize>> {
    let text = &query[range.clone()];
    let lead = text.len() - text.trim_start().len();
    let trail = text.len() - text.trim_end().len();
    if lead + trail >= text.len() {
        None
    } else {
        Some(range.start + lead..range.end - trail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_top_level_separators() {
        let stages = split_pipeline("filter a = 1 | sort desc(a) | limit 10");
        assert_eq!(stages, vec!["filter a = 1", "sort desc(a)", "limit 10"]);
    }

    #[test]
    fn ignores_separator_inside_strings() {
        let stages = split_pipeline(r#"filter body = "a|b" | filter name = 'x|y'"#);
        assert_eq!(stages, vec![r#"filter body = "a|b""#, "filter name = 'x|y'"]);
    }

    #[test]
    fn ignores_separator_inside_regex_with_flags() {
        let stages = split_pipeline("filter body ~ /GET|POST/i | limit 5");
        assert_eq!(stages, vec!["filter body ~ /GET|POST/i", "limit 5"]);
    }

    #[test]
    fn division_is_not_a_regex() {
        let stages = split_pipeline("make_col r: a / b | filter r > 1 | limit 1");
        assert_eq!(stages.len(), 3);
    }

    #[test]
    fn escaped_quote_keeps_string_open() {
        let stages = split_pipeline(r#"filter body = "say \"a|b\"" | limit 1"#);
        assert_eq!(stages.len(), 2);
    }

    #[test]
    fn drops_empty_stages() {
        let stages = split_pipeline("| filter a = 1 || limit 1 |");
        assert_eq!(stages, vec!["filter a = 1", "limit 1"]);
    }

    #[test]
    fn literal_mask_covers_delimiters() {
        let query = r#"filter a = "x""#;
        let scan = scan(query);
        let open = query.find('"').unwrap();
        assert!(!scan.in_literal(open - 1));
        assert!(scan.in_literal(open));
        assert!(scan.in_literal(query.len() - 1));
    }

    #[test]
    fn counts_only_delimiting_double_quotes() {
        assert_eq!(scan(r#"filter a = "x" and b = 'say "hi"'"#).double_quotes, 2);
        assert_eq!(scan(r#"filter a = "x \" y""#).double_quotes, 2);
        assert_eq!(scan(r#"filter a = "open"#).double_quotes, 1);
    }

    #[test]
    fn regex_flags_stop_at_non_flag_identifier() {
        let query = "filter a ~ /x/i and b ~ /y/and";
        let scanned = scan(query);
        assert!(scanned.in_literal(query.find("/i").unwrap() + 1));
        assert!(!scanned.in_literal(query.find(" and").unwrap() + 1));
        assert!(!scanned.in_literal(query.len() - 1));
        assert_eq!(scanned.open_literal, None);
    }

    #[test]
    fn records_literal_left_open() {
        assert_eq!(scan("filter a = 'x | limit 1").open_literal, Some(('\'', 11)));
        assert_eq!(scan("filter a ~ /x | limit 1").open_literal, Some(('/', 11)));
        assert_eq!(scan(r#"filter a = "x"#).open_literal, None);
    }

    #[test]
    fn leading_identifier_stops_at_punctuation() {
        assert_eq!(leading_identifier("  make_col x:1"), Some("make_col"));
        assert_eq!(leading_identifier("@\"1h\""), None);
        assert_eq!(leading_identifier("9lives"), None);
    }
}
