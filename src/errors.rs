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

//! # Opal Guard Error Module
//!
//! This module defines the error types used throughout Opal Guard.
//!
//! ## Error Categories
//!
//! - **Structural**: Unbalanced parentheses, brackets, braces or quotes
//! - **Complexity**: Stage count or nesting depth above the configured bound
//! - **UnknownVerb**: A stage begins with an identifier that is not a verb
//! - **UnknownFunction**: A call names a function that does not exist
//! - **Config**: Invalid validator configuration
//! - **Io**: Filesystem errors while loading configuration
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! The first four are query verdicts. Their `Display` text is what callers
//! receive in `ValidationResult::error_message`, so it is written for the
//! author of the query rather than for an operator reading logs.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Opal Guard.
pub type Result<T> = std::result::Result<T, OpalError>;

/// Canonical error enumeration for Opal Guard.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum OpalError {
    /// Unbalanced delimiters or quotes.
    #[error("{message}")]
    Structural { message: String },

    /// Query exceeds a fixed complexity bound.
    #[error("{message}")]
    Complexity { message: String },

    /// A stage's leading identifier is not a recognized verb.
    #[error("Unknown verb '{verb}' at stage {stage}.{}", suggestion_suffix(.suggestions))]
    UnknownVerb {
        verb: String,
        stage: usize,
        suggestions: Vec<String>,
    },

    /// A call identifier is not a recognized function.
    #[error("Unknown function '{function}'.{}", function_suffix(.hint, .suggestions))]
    UnknownFunction {
        function: String,
        hint: Option<String>,
        suggestions: Vec<String>,
    },

    /// Invalid validator configuration.
    #[error("config error: {message}")]
    Config { message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean: {}?", suggestions.join(", "))
    }
}

fn function_suffix(hint: &Option<String>, suggestions: &[String]) -> String {
    match hint {
        Some(hint) => format!(" {hint}"),
        None => suggestion_suffix(suggestions),
    }
}

impl From<io::Error> for OpalError {
    fn from(err: io::Error) -> Self {
        OpalError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OpalError {
    fn from(err: serde_json::Error) -> Self {
        OpalError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for OpalError {
    fn from(err: serde_yaml::Error) -> Self {
        OpalError::Serde(err.to_string())
    }
}

impl OpalError {
    /// Helper to construct structural errors.
    pub fn structural<T: Into<String>>(message: T) -> Self {
        OpalError::Structural {
            message: message.into(),
        }
    }

    /// Helper to construct complexity errors.
    pub fn complexity<T: Into<String>>(message: T) -> Self {
        OpalError::Complexity {
            message: message.into(),
        }
    }

    /// Helper to construct configuration errors.
    pub fn config<T: Into<String>>(message: T) -> Self {
        OpalError::Config {
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        OpalError::Internal(message.into())
    }

    /// Whether this error is a verdict on the query rather than a failure of
    /// the validator itself.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            OpalError::Structural { .. }
                | OpalError::Complexity { .. }
                | OpalError::UnknownVerb { .. }
                | OpalError::UnknownFunction { .. }
        )
    }
}
