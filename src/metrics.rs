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

use serde::Serialize;
use serde_json::Value;

use crate::result::OpalValidationResult;

/// Aggregate view over a set of validation results.
#[derive(Debug, Serialize, Default, PartialEq)]
pub struct OpalValidationMetrics {
    pub total_queries: usize,
    pub valid_queries: usize,
    pub invalid_queries: usize,
    /// Queries rewritten by at least one pass.
    pub auto_fixed_queries: usize,
    /// Rewritten queries that then passed validation.
    pub auto_fixed_valid_queries: usize,
    pub total_transformations: usize,
    pub average_transformations: f64,
    /// Share of rewritten queries that ended up valid, in `[0.0, 1.0]`.
    pub fix_rate: f64,
    pub valid_rate: f64,
}

impl OpalValidationMetrics {
    pub fn compute(results: &[OpalValidationResult]) -> Self {
        let mut metrics = OpalValidationMetrics {
            total_queries: results.len(),
            ..Default::default()
        };

        if results.is_empty() {
            return metrics;
        }

        for result in results {
            if result.is_valid {
                metrics.valid_queries += 1;
            } else {
                metrics.invalid_queries += 1;
            }
            if result.was_transformed() {
                metrics.auto_fixed_queries += 1;
                if result.is_valid {
                    metrics.auto_fixed_valid_queries += 1;
                }
            }
            metrics.total_transformations += result.transformations.len();
        }

        let total = results.len() as f64;
        metrics.average_transformations = metrics.total_transformations as f64 / total;
        metrics.valid_rate = metrics.valid_queries as f64 / total;
        metrics.fix_rate = if metrics.auto_fixed_queries > 0 {
            metrics.auto_fixed_valid_queries as f64 / metrics.auto_fixed_queries as f64
        } else {
            0.0
        };

        metrics
    }

    pub fn as_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
