//! Error types for pf-sql

use thiserror::Error;

/// SQL rendering and validation errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// Ad-hoc expression failed to parse (S001)
    #[error("[S001] Invalid SQL expression at line {line}, column {column}: {message}")]
    InvalidExpression {
        message: String,
        line: usize,
        column: usize,
    },

    /// Ad-hoc expression is empty (S002)
    #[error("[S002] SQL expression is empty")]
    EmptyExpression,

    /// Expression cannot be rendered by this dialect (S003)
    #[error("[S003] {dialect} cannot render {what}")]
    Unsupported { dialect: &'static str, what: String },

    /// SELECT with nothing to select (S004)
    #[error("[S004] No expressions to select from {table}")]
    NoExpressions { table: String },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
