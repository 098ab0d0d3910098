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

//! # Validation Engine
//!
//! [`OpalValidator`] ties the pieces together: the rewrite passes run first,
//! then the structural validator checks the final text once. The result
//! carries the rewritten query (when a pass fired), one explanation per
//! firing pass, and the first structural error, if any.

use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::OpalValidatorConfig;
use crate::errors::Result;
use crate::pass::OpalPassContext;
use crate::pipeline::OpalPassPipeline;
use crate::result::OpalValidationResult;
use crate::validator::validate_structure;

/// Validates and repairs OPAL queries under one configuration.
#[derive(Clone, Debug)]
pub struct OpalValidator {
    config: OpalValidatorConfig,
    pipeline: OpalPassPipeline,
}

impl Default for OpalValidator {
    fn default() -> Self {
        OpalValidator {
            config: OpalValidatorConfig::default(),
            pipeline: OpalPassPipeline::with_defaults(),
        }
    }
}

impl OpalValidator {
    /// Builds a validator, rejecting an invalid configuration.
    pub fn new(config: OpalValidatorConfig) -> Result<Self> {
        config.check()?;
        let pipeline = config
            .disabled_passes
            .iter()
            .fold(OpalPassPipeline::with_defaults(), |pipeline, name| {
                pipeline.without(name)
            })
            .with_rounds(config.pass_rounds);
        pipeline.validate()?;
        Ok(OpalValidator { config, pipeline })
    }

    pub fn config(&self) -> &OpalValidatorConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &OpalPassPipeline {
        &self.pipeline
    }

    /// Repairs and validates one query.
    ///
    /// `time_window` is the relative range the caller will run the query over
    /// (e.g. `"1h"`); when present, timestamp filters it makes redundant are
    /// dropped.
    pub fn validate(&self, query: &str, time_window: Option<&str>) -> OpalValidationResult {
        let ctx = OpalPassContext::new(time_window);
        let run = self.pipeline.run(query, &ctx);

        let transformations: Vec<String> =
            run.transformations.iter().map(ToString::to_string).collect();
        let transformed_query = run.changed().then(|| run.query.clone());

        match validate_structure(&run.query, &self.config) {
            Ok(()) => OpalValidationResult::valid(transformed_query, transformations),
            Err(err) => {
                log::debug!("query rejected: {err}");
                OpalValidationResult::invalid(&err, transformed_query, transformations)
            }
        }
    }

    /// Validates many queries sharing one time window. Results keep input order.
    pub fn validate_batch<S>(&self, queries: &[S], time_window: Option<&str>) -> Vec<OpalValidationResult>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            queries
                .par_iter()
                .map(|query| self.validate(query.as_ref(), time_window))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|query| self.validate(query.as_ref(), time_window))
                .collect()
        }
    }
}

static DEFAULT_VALIDATOR: OnceLock<OpalValidator> = OnceLock::new();

/// Validates `query` with the default configuration.
pub fn validate(query: &str, time_window: Option<&str>) -> OpalValidationResult {
    DEFAULT_VALIDATOR
        .get_or_init(OpalValidator::default)
        .validate(query, time_window)
}
