//! Error types for stmtqb

use thiserror::Error;

/// Result type alias for stmtqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum QbError {
    /// Builder created or finalized without a table name
    #[error("Configuration error: table name is required")]
    EmptyTable,

    /// INSERT finalized without any columns
    #[error("Configuration error: no columns specified")]
    NoColumns,

    /// INSERT finalized without a value/query clause
    #[error("Configuration error: no query specified")]
    NoQuery,

    /// Identifier that cannot be written for the dialect (empty part, unclosed quote)
    #[error("Invalid identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// Placeholder markers and arguments disagree inside one expression
    #[error(
        "Argument count mismatch in `{sql}`: {placeholders} placeholder(s), {args} argument(s)"
    )]
    ArgCountMismatch {
        sql: String,
        placeholders: usize,
        args: usize,
    },

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl QbError {
    /// Create an argument count mismatch error for an expression template
    pub fn mismatch(sql: impl Into<String>, placeholders: usize, args: usize) -> Self {
        Self::ArgCountMismatch {
            sql: sql.into(),
            placeholders,
            args,
        }
    }

    /// Check if this error comes from builder misconfiguration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyTable | Self::NoColumns | Self::NoQuery | Self::InvalidIdentifier { .. }
        )
    }

    /// Check if this is an argument count mismatch
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::ArgCountMismatch { .. })
    }
}
