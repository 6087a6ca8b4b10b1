use miette::Diagnostic;
use thiserror::Error;

use crate::values::ValueKind;

/// Result type for value-graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the value-graph engine
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(valgraph::io_error))]
    Io(String),

    #[error("JSON error: {message}")]
    #[diagnostic(code(valgraph::json_error))]
    Json { message: String },

    #[error("cannot mutate frozen {kind} node")]
    #[diagnostic(code(valgraph::frozen))]
    FrozenNode { kind: ValueKind },

    #[error("expected {expected} node, found {found}")]
    #[diagnostic(code(valgraph::kind_mismatch))]
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("array index {index} out of bounds (len {len})")]
    #[diagnostic(code(valgraph::index_out_of_bounds))]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid regular expression pattern: {message}")]
    #[diagnostic(code(valgraph::invalid_pattern))]
    InvalidPattern { message: String },

    #[error("invalid regular expression flags {flags:?}: {message}")]
    #[diagnostic(code(valgraph::invalid_flags))]
    InvalidFlags { flags: String, message: String },

    #[error("internal error: {message}")]
    #[diagnostic(code(valgraph::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
        }
    }
}
