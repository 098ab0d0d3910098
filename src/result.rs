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

use serde::{Deserialize, Serialize};

use crate::errors::OpalError;

/// Verdict of one validation call.
///
/// `transformed_query` is only set when at least one rewrite pass fired, and
/// `error_message` only when `is_valid` is false. Callers must not execute a
/// query whose result is invalid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpalValidationResult {
    pub is_valid: bool,
    pub transformed_query: Option<String>,
    pub transformations: Vec<String>,
    pub error_message: Option<String>,
}

impl OpalValidationResult {
    pub fn valid(transformed_query: Option<String>, transformations: Vec<String>) -> Self {
        OpalValidationResult {
            is_valid: true,
            transformed_query,
            transformations,
            error_message: None,
        }
    }

    pub fn invalid(
        error: &OpalError,
        transformed_query: Option<String>,
        transformations: Vec<String>,
    ) -> Self {
        OpalValidationResult {
            is_valid: false,
            transformed_query,
            transformations,
            error_message: Some(error.to_string()),
        }
    }

    /// The query the caller should execute: the rewrite if any, else `original`.
    pub fn effective_query<'a>(&'a self, original: &'a str) -> &'a str {
        self.transformed_query.as_deref().unwrap_or(original)
    }

    pub fn was_transformed(&self) -> bool {
        self.transformed_query.is_some()
    }

    /// Every transformation explanation, one per line, ready to be shown to
    /// whoever produced the query.
    pub fn explanation(&self) -> String {
        self.transformations.join("\n")
    }
}
