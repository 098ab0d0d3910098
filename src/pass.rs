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

//! # Opal Guard Pass Module
//!
//! This module defines the contract shared by every rewrite pass. A pass is a
//! plain function that receives the current query text and the call context,
//! and returns the (possibly rewritten) text together with an optional
//! [`OpalTransformation`] describing what it changed.
//!
//! ## Pass Design
//!
//! Passes are:
//!
//! - **Pure**: no I/O and no shared mutable state
//! - **Idempotent**: running a pass on its own output changes nothing
//! - **Conservative**: when a pattern is ambiguous the input is returned as is
//!
//! ## Implementing a Pass
//!
//! ```rust
//! use opal_guard::pass::{OpalPass, OpalPassContext, OpalPassOutcome};
//!
//! fn noop(query: &str, _ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
//!     OpalPassOutcome::unchanged(query)
//! }
//!
//! const NOOP: OpalPass = OpalPass { name: "noop", apply: noop };
//! ```

use std::fmt;

use serde::Serialize;

/// Caller-supplied context shared by all passes of one validation call.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpalPassContext<'a> {
    /// Relative time range declared alongside the query, e.g. `"1h"`.
    pub time_window: Option<&'a str>,
}

impl<'a> OpalPassContext<'a> {
    pub fn new(time_window: Option<&'a str>) -> Self {
        Self { time_window }
    }

    /// The declared window, ignoring blank values.
    pub fn declared_window(&self) -> Option<&'a str> {
        self.time_window.map(str::trim).filter(|w| !w.is_empty())
    }
}

/// A single fragment replacement performed by a pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpalRewrite {
    pub original: String,
    pub replacement: String,
}

impl OpalRewrite {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

/// Record of one pass firing: the fragments it rewrote and why.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpalTransformation {
    pub pass: &'static str,
    pub rewrites: Vec<OpalRewrite>,
    pub rationale: String,
}

impl fmt::Display for OpalTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rewrote ")?;
        for (idx, rewrite) in self.rewrites.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            if rewrite.replacement.is_empty() {
                write!(f, "`{}` (removed)", rewrite.original)?;
            } else {
                write!(f, "`{}` to `{}`", rewrite.original, rewrite.replacement)?;
            }
        }
        write!(f, ": {}", self.rationale)
    }
}

/// Output of a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpalPassOutcome {
    pub query: String,
    pub transformation: Option<OpalTransformation>,
}

impl OpalPassOutcome {
    /// The pass found nothing to rewrite.
    pub fn unchanged(query: &str) -> Self {
        Self {
            query: query.to_string(),
            transformation: None,
        }
    }

    /// The pass rewrote the query. An empty rewrite list means nothing fired.
    pub fn rewritten(
        query: String,
        pass: &'static str,
        rewrites: Vec<OpalRewrite>,
        rationale: impl Into<String>,
    ) -> Self {
        if rewrites.is_empty() {
            return Self {
                query,
                transformation: None,
            };
        }
        Self {
            query,
            transformation: Some(OpalTransformation {
                pass,
                rewrites,
                rationale: rationale.into(),
            }),
        }
    }

    pub fn fired(&self) -> bool {
        self.transformation.is_some()
    }
}

/// Signature shared by every rewrite pass.
pub type OpalPassFn = fn(&str, &OpalPassContext<'_>) -> OpalPassOutcome;

/// A named rewrite pass.
#[derive(Clone, Copy)]
pub struct OpalPass {
    pub name: &'static str,
    pub apply: OpalPassFn,
}

impl fmt::Debug for OpalPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpalPass").field("name", &self.name).finish()
    }
}

/// Runs a pass and logs when it fires.
pub fn execute_pass(pass: &OpalPass, query: &str, ctx: &OpalPassContext<'_>) -> OpalPassOutcome {
    let outcome = (pass.apply)(query, ctx);
    if let Some(transformation) = &outcome.transformation {
        log::debug!(
            "pass '{}' rewrote {} fragment(s)",
            pass.name,
            transformation.rewrites.len()
        );
    }
    outcome
}
