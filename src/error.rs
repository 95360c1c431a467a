//! Error types for scope configuration.
//!
//! Only user-input problems are represented here. Mistakes in the declaring
//! code (duplicate params, clashing flags, misuse of the scope tree) panic
//! instead, since they can never be fixed by the person running the binary.

use thiserror::Error;

/// Errors produced while parsing a source or populating params
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unexpected config parameter {0:?}")]
    UnexpectedArg(String),

    #[error("boolean param {flag:?} cannot have a value {value:?}")]
    BoolWithValue { flag: String, value: String },

    #[error("param {0:?} expected a value")]
    MissingValue(String),

    #[error("required parameter is not set: {0}")]
    RequiredNotSet(String),

    #[error("invalid value for param {param}: {reason}")]
    InvalidValue { param: String, reason: String },

    #[error("Logging error: {0}")]
    Logging(String),
}

impl ConfigError {
    /// Fully qualified name of the param this error is about, if any
    pub fn param(&self) -> Option<&str> {
        match self {
            ConfigError::RequiredNotSet(param) => Some(param),
            ConfigError::InvalidValue { param, .. } => Some(param),
            ConfigError::BoolWithValue { flag, .. } => Some(flag),
            ConfigError::MissingValue(flag) => Some(flag),
            ConfigError::UnexpectedArg(_) | ConfigError::Logging(_) => None,
        }
    }
}
