//! Scoped SQLite connections.
//!
//! A [`Database`] is only a path. Each operation that is not handed an
//! existing connection opens a fresh one, runs inside a transaction,
//! commits, and closes the connection again. Dropping the transaction on
//! an error path rolls it back.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::DbError;

/// A database file opened anew for every unit of work.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection. Closed when dropped.
    pub fn connect(&self) -> Result<Connection, DbError> {
        log::debug!("opening {}", self.path.display());
        Ok(Connection::open(&self.path)?)
    }

    /// Runs `op` inside a transaction on a fresh connection and commits if
    /// it returns `Ok`.
    pub fn with_transaction<R, E>(
        &self,
        op: impl FnOnce(&Connection) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<DbError>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(DbError::from)?;
        let result = op(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(result)
    }

    /// Runs `op` on `conn` if given, otherwise inside
    /// [`with_transaction`](Self::with_transaction). A caller-supplied
    /// connection is never committed here.
    pub fn scoped<R, E>(
        &self,
        conn: Option<&Connection>,
        op: impl FnOnce(&Connection) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<DbError>,
    {
        match conn {
            Some(conn) => op(conn),
            None => self.with_transaction(op),
        }
    }
}
