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

//! # Python Bindings Module
//!
//! This module exposes the validator to the Python query-execution service:
//! - `validate(query, time_window=None)` for one-off calls
//! - `OpalValidator` for a validator built from a JSON or YAML config
//! - `OpalMetrics` for process-wide validation counters
//!
//! ## Usage Example
//!
//! ```python
//! import opal_guard
//!
//! result = opal_guard.validate('filter timestamp > @"1 hour ago" | sort -count', "1h")
//! if result.is_valid:
//!     run(result.effective_query(query))
//!     notes = result.explanation()
//! else:
//!     raise ValueError(result.error_message)
//! ```

#[cfg(feature = "pyo3")]
pub mod py {
    use pyo3::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Instant;

    use crate::config::OpalValidatorConfig;
    use crate::engine::OpalValidator;
    use crate::result::OpalValidationResult;

    static GLOBAL_START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    static GLOBAL_TOTAL_QUERIES: AtomicU64 = AtomicU64::new(0);
    static GLOBAL_INVALID_QUERIES: AtomicU64 = AtomicU64::new(0);
    static GLOBAL_FIXED_QUERIES: AtomicU64 = AtomicU64::new(0);
    static GLOBAL_TRANSFORMATIONS: AtomicU64 = AtomicU64::new(0);

    fn get_start_time() -> Instant {
        *GLOBAL_START_TIME.get_or_init(Instant::now)
    }

    fn record_result(result: &OpalValidationResult) {
        get_start_time();
        GLOBAL_TOTAL_QUERIES.fetch_add(1, Ordering::Relaxed);
        if !result.is_valid {
            GLOBAL_INVALID_QUERIES.fetch_add(1, Ordering::Relaxed);
        }
        if result.was_transformed() {
            GLOBAL_FIXED_QUERIES.fetch_add(1, Ordering::Relaxed);
        }
        GLOBAL_TRANSFORMATIONS.fetch_add(result.transformations.len() as u64, Ordering::Relaxed);
    }

    fn to_py_err(err: crate::errors::OpalError) -> PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }

    // =============================================================================
    // ValidationResult
    // =============================================================================

    /// Python wrapper for a validation verdict.
    #[pyclass(name = "ValidationResult")]
    #[derive(Clone)]
    pub struct OpalValidationResultPy {
        pub inner: OpalValidationResult,
    }

    #[pymethods]
    impl OpalValidationResultPy {
        #[getter(is_valid)]
        fn is_valid(&self) -> bool {
            self.inner.is_valid
        }

        #[getter(transformed_query)]
        fn transformed_query(&self) -> Option<String> {
            self.inner.transformed_query.clone()
        }

        #[getter(transformations)]
        fn transformations(&self) -> Vec<String> {
            self.inner.transformations.clone()
        }

        #[getter(error_message)]
        fn error_message(&self) -> Option<String> {
            self.inner.error_message.clone()
        }

        fn effective_query(&self, original: &str) -> String {
            self.inner.effective_query(original).to_string()
        }

        fn explanation(&self) -> String {
            self.inner.explanation()
        }

        fn to_json(&self) -> PyResult<String> {
            serde_json::to_string(&self.inner)
                .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
        }

        fn __repr__(&self) -> String {
            format!(
                "ValidationResult(is_valid={}, transformations={})",
                self.inner.is_valid,
                self.inner.transformations.len()
            )
        }
    }

    // =============================================================================
    // OpalValidator
    // =============================================================================

    /// Python wrapper for a configured validator.
    #[pyclass(name = "OpalValidator")]
    pub struct OpalValidatorPy {
        inner: OpalValidator,
    }

    #[pymethods]
    impl OpalValidatorPy {
        #[new]
        #[pyo3(signature = (config=None))]
        fn new(config: Option<&str>) -> PyResult<Self> {
            let config = match config {
                Some(source) => OpalValidatorConfig::from_json_str(source).map_err(to_py_err)?,
                None => OpalValidatorConfig::default(),
            };
            Ok(Self {
                inner: OpalValidator::new(config).map_err(to_py_err)?,
            })
        }

        #[staticmethod]
        fn from_yaml(source: &str) -> PyResult<Self> {
            let config = OpalValidatorConfig::from_yaml_str(source).map_err(to_py_err)?;
            Ok(Self {
                inner: OpalValidator::new(config).map_err(to_py_err)?,
            })
        }

        #[pyo3(signature = (query, time_window=None))]
        fn validate(&self, query: &str, time_window: Option<&str>) -> OpalValidationResultPy {
            let inner = self.inner.validate(query, time_window);
            record_result(&inner);
            OpalValidationResultPy { inner }
        }

        #[pyo3(signature = (queries, time_window=None))]
        fn validate_batch(
            &self,
            queries: Vec<String>,
            time_window: Option<&str>,
        ) -> Vec<OpalValidationResultPy> {
            self.inner
                .validate_batch(&queries, time_window)
                .into_iter()
                .map(|inner| {
                    record_result(&inner);
                    OpalValidationResultPy { inner }
                })
                .collect()
        }

        fn pass_names(&self) -> Vec<&'static str> {
            self.inner.pipeline().names()
        }

        fn __repr__(&self) -> String {
            format!("OpalValidator(passes={})", self.inner.pipeline().names().len())
        }
    }

    // =============================================================================
    // OpalMetrics - Runtime metrics
    // =============================================================================

    /// Process-wide validation counters.
    #[pyclass]
    pub struct OpalMetrics {
        uptime_seconds: u64,
        total_queries: u64,
        invalid_queries: u64,
        fixed_queries: u64,
        transformations: u64,
    }

    fn snapshot() -> OpalMetrics {
        OpalMetrics {
            uptime_seconds: get_start_time().elapsed().as_secs(),
            total_queries: GLOBAL_TOTAL_QUERIES.load(Ordering::Relaxed),
            invalid_queries: GLOBAL_INVALID_QUERIES.load(Ordering::Relaxed),
            fixed_queries: GLOBAL_FIXED_QUERIES.load(Ordering::Relaxed),
            transformations: GLOBAL_TRANSFORMATIONS.load(Ordering::Relaxed),
        }
    }

    #[pymethods]
    impl OpalMetrics {
        #[new]
        fn new() -> Self {
            snapshot()
        }

        fn refresh(&mut self) {
            *self = snapshot();
        }

        fn reset(&mut self) {
            GLOBAL_TOTAL_QUERIES.store(0, Ordering::Relaxed);
            GLOBAL_INVALID_QUERIES.store(0, Ordering::Relaxed);
            GLOBAL_FIXED_QUERIES.store(0, Ordering::Relaxed);
            GLOBAL_TRANSFORMATIONS.store(0, Ordering::Relaxed);
            *self = snapshot();
        }

        #[getter(uptime_seconds)]
        fn uptime_seconds(&self) -> u64 {
            self.uptime_seconds
        }

        #[getter(total_queries)]
        fn total_queries(&self) -> u64 {
            self.total_queries
        }

        #[getter(invalid_queries)]
        fn invalid_queries(&self) -> u64 {
            self.invalid_queries
        }

        #[getter(fixed_queries)]
        fn fixed_queries(&self) -> u64 {
            self.fixed_queries
        }

        #[getter(transformations)]
        fn transformations(&self) -> u64 {
            self.transformations
        }

        fn __repr__(&self) -> String {
            format!(
                "OpalMetrics(queries={}, invalid={}, fixed={})",
                self.total_queries, self.invalid_queries, self.fixed_queries
            )
        }
    }

    // =============================================================================
    // Module functions
    // =============================================================================

    /// Validates `query` with the default configuration.
    #[pyfunction]
    #[pyo3(signature = (query, time_window=None))]
    fn validate(query: &str, time_window: Option<&str>) -> OpalValidationResultPy {
        let inner = crate::engine::validate(query, time_window);
        record_result(&inner);
        OpalValidationResultPy { inner }
    }

    #[pymodule]
    pub fn opal_guard(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<OpalValidationResultPy>()?;
        m.add_class::<OpalValidatorPy>()?;
        m.add_class::<OpalMetrics>()?;
        m.add_function(wrap_pyfunction!(validate, m)?)?;

        m.add("__version__", env!("CARGO_PKG_VERSION"))?;
        m.add("__author__", "Dunimd Team")?;
        m.add("__license__", "Apache-2.0")?;

        Ok(())
    }
}
