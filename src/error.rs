//! Custom error types for the wizard engine
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions. Navigation refusals are not errors;
//! they are reported through `sequencer::Outcome`.

use thiserror::Error;

/// The main error type for wizard operations
#[derive(Error, Debug)]
pub enum WizardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Step data failed its validator
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed wizard definition
    #[error("Definition error: {0}")]
    Definition(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Interactive session errors
    #[error("Session error: {0}")]
    Session(String),
}

impl WizardError {
    /// Create a "not found" error for wizard definitions
    pub fn definition_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Definition",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for WizardError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;
