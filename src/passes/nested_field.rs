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

//! Quotes dotted attribute keys inside known container columns.
//!
//! OpenTelemetry attribute keys such as `k8s.namespace.name` contain dots.
//! Written bare, `resource_attributes.k8s.namespace.name` is read as four
//! levels of nesting; the key has to be quoted to be read as one field:
//! `resource_attributes."k8s.namespace.name"`.

use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::scan;
use crate::pass::{OpalPassContext, OpalPassOutcome, OpalRewrite};
use crate::passes::{continues_path, splice};

pub const NAME: &str = "nested_field";

const RATIONALE: &str = "OPAL reads every dot as a nested field access, so attribute keys \
     that contain dots must be quoted.";

/// Object columns that hold dotted attribute keys.
pub const PARENT_FIELDS: &[&str] = &[
    "resource_attributes",
    "span_attributes",
    "attributes",
    "fields",
    "labels",
];

/// Leading segments of well-known dotted attribute keys.
pub const ATTRIBUTE_PREFIXES: &[&str] = &[
    "k8s",
    "service",
    "host",
    "cloud",
    "container",
    "deployment",
    "process",
    "os",
    "telemetry",
    "http",
    "net",
    "network",
    "db",
    "rpc",
    "messaging",
    "faas",
    "aws",
    "gcp",
    "azure",
    "url",
    "server",
    "client",
    "user_agent",
    "exception",
    "code",
    "thread",
    "otel",
    "log",
    "peer",
    "enduser",
    "device",
    "session",
];

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"\b({})\.({})((?:\.[A-Za-z0-9_]+)+)",
            PARENT_FIELDS.join("|"),
            ATTRIBUTE_PREFIXES.join("|")
        );
        Regex::new(&pattern).expect("valid nested field pattern")
    })
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
        // A trailing `(` would make this a call, not a field path.
        if query[whole.end()..].trim_start().starts_with('(') {
            continue;
        }

        let replacement = format!("{}.\"{}{}\"", &caps[1], &caps[2], &caps[3]);
        rewrites.push(OpalRewrite::new(whole.as_str(), replacement.clone()));
        edits.push((whole.range(), replacement));
    }

    if edits.is_empty() {
        return OpalPassOutcome::unchanged(query);
    }
    OpalPassOutcome::rewritten(splice(query, edits), NAME, rewrites, RATIONALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(query: &str) -> OpalPassOutcome {
        apply(query, &OpalPassContext::default())
    }

    #[test]
    fn quotes_dotted_kubernetes_key() {
        let outcome = run("filter resource_attributes.k8s.namespace.name = \"prod\"");
        assert_eq!(
            outcome.query,
            "filter resource_attributes.\"k8s.namespace.name\" = \"prod\""
        );
        assert!(outcome.fired());
    }

    #[test]
    fn already_quoted_key_is_untouched() {
        let outcome = run("filter resource_attributes.\"k8s.namespace.name\" = \"prod\"");
        assert!(!outcome.fired());
    }

    #[test]
    fn text_inside_strings_is_untouched() {
        let outcome = run("filter body ~ \"attributes.http.status.code\"");
        assert!(!outcome.fired());
    }

    #[test]
    fn unknown_prefix_is_untouched() {
        let outcome = run("make_col x: attributes.custom.thing.deep");
        assert!(!outcome.fired());
    }

    #[test]
    fn longer_parent_name_is_not_split() {
        let outcome = run("make_col x: span_attributes.http.method");
        assert_eq!(outcome.query, "make_col x: span_attributes.\"http.method\"");
    }
}
