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

//! # Opal Guard Core Library
//!
//! Static validation and auto-repair for OPAL, the pipeline query language of
//! an observability backend. Generated queries are checked before they are
//! sent, and the most common mistakes are rewritten on the way, each rewrite
//! reported as a human-readable explanation.
//!
//! ## Module Overview
//!
//! - **lexer**: literal-aware splitting of a query into pipeline stages
//! - **reference**: process-wide whitelists of verbs and functions
//! - **pass**: the contract shared by rewrite passes
//! - **passes**: built-in rewrite passes, in execution order
//! - **pipeline**: runs passes in sequence
//! - **validator**: ordered structural checks
//! - **engine**: the [`OpalValidator`] facade and [`validate`]
//! - **config**: validator configuration and file loading
//! - **result**: the per-call [`OpalValidationResult`]
//! - **metrics**: aggregate statistics over many results
//!
//! ## Feature Flags
//!
//! - `parallel`: validates batches on the rayon thread pool
//! - `pyo3`: enables Python bindings (PyO3 integration)
//! - `full`: enables all features except `pyo3`
//!
//! ## Quick Start
//!
//! ```rust
//! use opal_guard::validate;
//!
//! let query = r#"filter timestamp > @"1 hour ago" | filter body ~ <error exception> | sort -count"#;
//! let result = validate(query, Some("1h"));
//!
//! assert!(result.is_valid);
//! let to_run = result.effective_query(query);
//! let notes = result.explanation();
//! ```
//!
//! ## Error Handling
//!
//! Query verdicts never surface as `Err`: they are rendered into
//! `OpalValidationResult::error_message`. Fallible setup such as loading a
//! configuration returns `Result<T, OpalError>`.

pub mod config;
pub mod engine;
pub mod errors;
pub mod lexer;
pub mod metrics;
pub mod pass;
pub mod passes;
pub mod pipeline;
#[cfg(feature = "pyo3")]
pub mod py;
pub mod reference;
pub mod result;
pub mod validator;

pub use config::OpalValidatorConfig;
pub use engine::{validate, OpalValidator};
pub use errors::{OpalError, Result};
pub use lexer::{scan, split_pipeline, OpalScan};
pub use metrics::OpalValidationMetrics;
pub use pass::{OpalPass, OpalPassContext, OpalPassOutcome, OpalRewrite, OpalTransformation};
pub use passes::{pass_names, DEFAULT_PASSES};
pub use pipeline::{OpalPassPipeline, OpalPassRun};
pub use reference::{reference_tables, OpalReferenceTables};
pub use result::OpalValidationResult;
pub use validator::validate_structure;
