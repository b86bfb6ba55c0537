use thiserror::Error;

/// Errors raised by the composite codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot read '{text}' as {target}")]
    Coerce { text: String, target: &'static str },
    #[error("expected a {expected} storage value, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    FromSql(#[from] rusqlite::types::FromSqlError),
}

/// Errors returned by statement building and execution.
#[derive(Debug, Error)]
pub enum DbError {
    /// Raised by SQLite itself; passed through untouched.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("no changes are being made")]
    NoChanges,

    #[error("row shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("column '{column}' can only be written with a plain value, not an expression")]
    NotAValue { column: String },

    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl DbError {
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// True for the caller-contract violations detected before touching SQLite.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::NoChanges | Self::ShapeMismatch { .. } | Self::NotAValue { .. }
        )
    }
}
