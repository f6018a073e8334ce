//! Core error types for pomotimer-core.
//!
//! Every failure the core can produce is recoverable: configuration problems
//! degrade to defaults or keep the previous value, and a rejected start leaves
//! the session untouched. The display layer decides how to present them.

use std::path::PathBuf;
use thiserror::Error;

use crate::storage::ConfigField;

/// Core error type for pomotimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration could not be written
    #[error("Configuration save error: {0}")]
    ConfigSave(#[from] ConfigSaveError),

    /// An edited configuration field was rejected
    #[error("Configuration validation error: {0}")]
    ConfigValidation(#[from] ConfigValidationError),

    /// A work session could not be started
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a persisted configuration record was not used.
///
/// Always paired with the default configuration; never fatal.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration at {path} is invalid: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigValidationError,
    },
}

/// Failure to persist the configuration record.
#[derive(Error, Debug)]
pub enum ConfigSaveError {
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("Failed to save configuration to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reported by stores that refuse writes (e.g. a read-only test double).
    #[error("Configuration store rejected the write: {0}")]
    Rejected(String),
}

/// An edited configuration field did not hold a positive integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("'{field}' must be an integer, got '{value}'")]
    NotAnInteger { field: ConfigField, value: String },

    #[error("'{field}' must be positive, got {value}")]
    NotPositive { field: ConfigField, value: i64 },

    #[error("'{field}' is out of range: {value}")]
    OutOfRange { field: ConfigField, value: i64 },
}

impl ConfigValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> ConfigField {
        match self {
            Self::NotAnInteger { field, .. }
            | Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. } => *field,
        }
    }
}

/// Rejected `StartWork` input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a task name.")]
    EmptyTaskName,

    #[error("Total iterations must be an integer, got '{0}'")]
    IterationsNotAnInteger(String),

    #[error("Total iterations must be positive, got {0}")]
    IterationsNotPositive(i64),

    #[error("Total iterations is out of range: {0}")]
    IterationsOutOfRange(i64),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
