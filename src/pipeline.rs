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

use std::collections::HashSet;

use crate::errors::{OpalError, Result};
use crate::pass::{execute_pass, OpalPass, OpalPassContext, OpalTransformation};
use crate::passes::DEFAULT_PASSES;

/// Text produced by a pipeline run and the transformations that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpalPassRun {
    pub query: String,
    pub transformations: Vec<OpalTransformation>,
}

impl OpalPassRun {
    pub fn changed(&self) -> bool {
        !self.transformations.is_empty()
    }
}

/// Linear pipeline of rewrite passes applied in sequence.
#[derive(Clone, Debug)]
pub struct OpalPassPipeline {
    passes: Vec<OpalPass>,
    rounds: usize,
}

impl Default for OpalPassPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl OpalPassPipeline {
    /// Constructs a pipeline from a list of passes, run once.
    pub fn new(passes: Vec<OpalPass>) -> Self {
        OpalPassPipeline { passes, rounds: 1 }
    }

    /// Pipeline holding every built-in pass in its fixed order.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_PASSES.to_vec())
    }

    /// Drops the pass with the given name, if present.
    pub fn without(mut self, name: &str) -> Self {
        self.passes.retain(|pass| pass.name != name);
        self
    }

    /// Maximum number of times the whole sequence is applied. Rounds stop
    /// early once a full round fires no pass.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name).collect()
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Ensures at least one round is configured and pass names are unique.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(OpalError::config("pass pipeline needs at least one round"));
        }
        let mut seen = HashSet::new();
        for pass in &self.passes {
            if !seen.insert(pass.name) {
                return Err(OpalError::config(format!(
                    "pass '{}' registered twice",
                    pass.name
                )));
            }
        }
        Ok(())
    }

    /// Runs every pass in order, feeding each the previous pass's output.
    pub fn run(&self, query: &str, ctx: &OpalPassContext<'_>) -> OpalPassRun {
        self.run_with_progress(query, ctx, |_, _| {})
    }

    /// Like [`run`](Self::run), reporting each pass name and whether it fired.
    pub fn run_with_progress(
        &self,
        query: &str,
        ctx: &OpalPassContext<'_>,
        progress: impl Fn(&str, bool),
    ) -> OpalPassRun {
        let mut current = query.to_string();
        let mut transformations = Vec::new();

        for round in 0..self.rounds.max(1) {
            let mut fired = false;
            for pass in &self.passes {
                let outcome = execute_pass(pass, &current, ctx);
                progress(pass.name, outcome.fired());
                if let Some(transformation) = outcome.transformation {
                    fired = true;
                    transformations.push(transformation);
                    current = outcome.query;
                }
            }
            if !fired {
                break;
            }
            if round + 1 == self.rounds {
                log::debug!("pass pipeline stopped after {} round(s)", self.rounds);
            }
        }

        OpalPassRun {
            query: current,
            transformations,
        }
    }
}
