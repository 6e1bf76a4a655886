//! Error types for expression parsing and evaluation.

use thiserror::Error;

/// Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while parsing or evaluating a binding expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Malformed expression text. `offset` is a byte offset into the
    /// expression (not the surrounding template).
    #[error("parse error at offset {offset}: {message}")]
    Parse { message: String, offset: usize },

    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("type error: {0}")]
    Type(String),
}

impl ExprError {
    pub(crate) fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::Parse {
            message: message.into(),
            offset,
        }
    }
}
