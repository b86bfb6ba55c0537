use registrar_lib::RegistrarError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Registrar operation failed
    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Argument combination the command refuses to run with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
