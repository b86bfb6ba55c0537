//! Entry point tying the record façades to one database file.

use std::path::{Path, PathBuf};

use registrar_db::{Connection, Database, DbError};

use crate::error::RegistrarError;
use crate::schema;
use crate::tables::{Games, Serieses, Teams, Users};

/// A league database: users, teams, series and games.
#[derive(Debug, Clone)]
pub struct Registrar {
    db: Database,
    users: Users,
    teams: Teams,
    serieses: Serieses,
    games: Games,
}

impl Registrar {
    /// Opens (creating if needed) the database at `path` and ensures every
    /// table exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistrarError> {
        let db = Database::new(path);
        if let Some(parent) = db.path().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        schema::ensure_tables(&db)?;
        log::debug!("registrar opened at {}", db.path().display());
        Ok(Self {
            users: Users::new(db.clone()),
            teams: Teams::new(db.clone()),
            serieses: Serieses::new(db.clone()),
            games: Games::new(db.clone()),
            db,
        })
    }

    pub fn path(&self) -> &Path {
        self.db.path()
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn serieses(&self) -> &Serieses {
        &self.serieses
    }

    /// Alias for [`serieses`](Self::serieses).
    pub fn series(&self) -> &Serieses {
        &self.serieses
    }

    pub fn games(&self) -> &Games {
        &self.games
    }

    /// Runs `op` in one transaction. Pass `Some(conn)` to each façade call
    /// inside so they all commit or roll back together.
    pub fn transaction<R, E>(&self, op: impl FnOnce(&Connection) -> Result<R, E>) -> Result<R, E>
    where
        E: From<DbError>,
    {
        self.db.with_transaction(op)
    }
}
