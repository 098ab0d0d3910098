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

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{OpalError, Result};
use crate::passes::pass_names;

/// Configuration for [`OpalValidator`](crate::engine::OpalValidator).
///
/// Every field has a default, so a config file only needs to name what it
/// changes. Loaded configs are always passed through [`check`](Self::check).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpalValidatorConfig {
    /// Maximum number of pipeline stages.
    pub max_stages: usize,
    /// Maximum delimiter nesting depth.
    pub max_nesting_depth: usize,
    /// Maximum lookalike names offered with an unknown verb or function.
    pub max_suggestions: usize,
    /// How many times the pass sequence may run. `1` applies each pass once;
    /// larger values repeat until a full round fires nothing.
    pub pass_rounds: usize,
    /// Names of built-in passes to skip.
    pub disabled_passes: Vec<String>,
}

impl Default for OpalValidatorConfig {
    fn default() -> Self {
        OpalValidatorConfig {
            max_stages: 20,
            max_nesting_depth: 10,
            max_suggestions: 5,
            pass_rounds: 1,
            disabled_passes: Vec::new(),
        }
    }
}

impl OpalValidatorConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: OpalValidatorConfig = serde_json::from_str(source)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: OpalValidatorConfig = serde_yaml::from_str(source)?;
        config.check()?;
        Ok(config)
    }

    /// Loads a config file, choosing the format from its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let config = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            other => {
                return Err(OpalError::config(format!(
                    "unsupported config extension '{other}' for {}",
                    path.display()
                )))
            }
        };
        log::info!("loaded validator config from {}", path.display());
        Ok(config)
    }

    /// Rejects zero bounds and unknown pass names.
    pub fn check(&self) -> Result<()> {
        if self.max_stages == 0 {
            return Err(OpalError::config("max_stages must be at least 1"));
        }
        if self.max_nesting_depth == 0 {
            return Err(OpalError::config("max_nesting_depth must be at least 1"));
        }
        if self.pass_rounds == 0 {
            return Err(OpalError::config("pass_rounds must be at least 1"));
        }
        let known = pass_names();
        if let Some(unknown) = self
            .disabled_passes
            .iter()
            .find(|name| !known.contains(&name.as_str()))
        {
            return Err(OpalError::config(format!(
                "unknown pass '{unknown}' in disabled_passes (known: {})",
                known.join(", ")
            )));
        }
        Ok(())
    }
}
