//! Error types and exit codes for ausflug
//!
//! The query engine itself never raises: malformed records, broken
//! persistence, and failed geocoding all degrade silently. This type
//! covers the CLI-facing concerns around it, such as usage errors,
//! unresolvable configuration, and IO on explicit paths.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (no dataset configured, unresolvable record)

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes per the CLI contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing dataset, unresolvable record (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during ausflug operations
#[derive(Error, Debug)]
pub enum AusflugError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("no dataset configured (pass --data or set `dataset` in the config file)")]
    NoDataset,

    #[error("no record matches \"{term}\"")]
    NoMatch { term: String },

    #[error("\"{term}\" is ambiguous ({count} matches): {candidates}")]
    AmbiguousMatch {
        term: String,
        count: usize,
        candidates: String,
    },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl AusflugError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        AusflugError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AusflugError::UnknownFormat(_)
            | AusflugError::UsageError(_)
            | AusflugError::InvalidValue { .. } => ExitCode::Usage,

            AusflugError::NoDataset
            | AusflugError::NoMatch { .. }
            | AusflugError::AmbiguousMatch { .. }
            | AusflugError::InvalidConfig { .. } => ExitCode::Data,

            AusflugError::Io(_)
            | AusflugError::Json(_)
            | AusflugError::Toml(_)
            | AusflugError::Other(_) => ExitCode::Failure,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AusflugError::UnknownFormat(_) => "unknown_format",
            AusflugError::UsageError(_) => "usage_error",
            AusflugError::InvalidValue { .. } => "invalid_value",
            AusflugError::NoDataset => "no_dataset",
            AusflugError::NoMatch { .. } => "no_match",
            AusflugError::AmbiguousMatch { .. } => "ambiguous_match",
            AusflugError::InvalidConfig { .. } => "invalid_config",
            AusflugError::Io(_) => "io_error",
            AusflugError::Json(_) => "json_error",
            AusflugError::Toml(_) => "toml_error",
            AusflugError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for ausflug operations
pub type Result<T> = std::result::Result<T, AusflugError>;
