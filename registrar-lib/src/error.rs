use registrar_db::DbError;
use thiserror::Error;

/// Errors raised by the record façades and the settings file.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("the discord_id '{0}' already exists in the USERS table")]
    DuplicateDiscordId(String),

    #[error("the username '{0}' already exists in the USERS table")]
    DuplicateUsername(String),

    #[error("no row with {column} {id} in {table}")]
    NotFound {
        table: &'static str,
        column: &'static str,
        id: i64,
    },

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistrarError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    pub(crate) fn not_found(table: &'static str, column: &'static str, id: i64) -> Self {
        Self::NotFound { table, column, id }
    }
}
