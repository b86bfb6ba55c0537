//! Get/add/remove/edit over one table.
//!
//! Writes take an optional external connection. Without one, the operation
//! opens its own connection and commits; with one, the statement runs on it
//! and committing is left to the caller.

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use crate::builder::{
    Clauses, Match, Statement, build_insert, build_set, decompile_row, where_clause,
};
use crate::column::{FromRow, Part};
use crate::connection::Database;
use crate::error::DbError;

/// Operations on a single table.
#[derive(Debug, Clone)]
pub struct Table {
    db: Database,
    name: String,
}

impl Table {
    pub fn new(db: Database, name: impl Into<String>) -> Self {
        Self {
            db,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // ── Get ─────────────────────────────────────────────────────────────────

    pub fn select_statement(&self, parts: &[Part], matching: Match) -> Statement {
        let (filter, params) = where_clause(parts, matching);
        Statement {
            sql: format!("SELECT * FROM {}{}", self.name, filter),
            params,
        }
    }

    /// Fetches rows matching `parts` on a fresh connection.
    ///
    /// `parts` must list every column of the table in order: each row is
    /// decoded positionally through them. `batch` caps the number of rows.
    pub fn get<R: FromRow>(
        &self,
        parts: &[Part],
        batch: Option<usize>,
        matching: Match,
    ) -> Result<Vec<R>, DbError> {
        let conn = self.db.connect()?;
        self.fetch(&conn, parts, batch, matching)
    }

    /// The first matching row, if any.
    pub fn get_one<R: FromRow>(
        &self,
        parts: &[Part],
        matching: Match,
    ) -> Result<Option<R>, DbError> {
        Ok(self.get(parts, Some(1), matching)?.into_iter().next())
    }

    /// Like [`get`](Self::get), on an existing connection.
    pub fn fetch<R: FromRow>(
        &self,
        conn: &Connection,
        parts: &[Part],
        batch: Option<usize>,
        matching: Match,
    ) -> Result<Vec<R>, DbError> {
        let statement = self.select_statement(parts, matching);
        log::debug!("{} [{} params]", statement.sql, statement.params.len());

        let mut stmt = conn.prepare(&statement.sql)?;
        let width = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(statement.params.iter()))?;

        let mut records = Vec::new();
        while batch.is_none_or(|limit| records.len() < limit) {
            let Some(row) = rows.next()? else {
                break;
            };
            let values = (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<Result<Vec<_>, _>>()?;
            records.push(R::from_row(decompile_row(values, parts)?)?);
        }
        Ok(records)
    }

    // ── Add ─────────────────────────────────────────────────────────────────

    pub fn insert_statement(&self, parts: &[Part]) -> Result<Statement, DbError> {
        let Clauses { fragments, params } = build_insert(parts)?;
        let sql = if fragments.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.name)
        } else {
            let placeholders = vec!["?"; fragments.len()].join(",");
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.name,
                fragments.join(","),
                placeholders
            )
        };
        Ok(Statement { sql, params })
    }

    /// Inserts one row. Omitted parts are left to the column defaults.
    pub fn add(&self, parts: &[Part], conn: Option<&Connection>) -> Result<(), DbError> {
        self.add_with(parts, conn, |_| ())
    }

    /// Inserts one row and hands the connection it ran on to `on_insert`,
    /// before any commit, e.g. to read `last_insert_rowid()`.
    pub fn add_with<R>(
        &self,
        parts: &[Part],
        conn: Option<&Connection>,
        on_insert: impl FnOnce(&Connection) -> R,
    ) -> Result<R, DbError> {
        let statement = self.insert_statement(parts)?;
        self.db.scoped(conn, |conn| {
            execute(conn, &statement)?;
            Ok(on_insert(conn))
        })
    }

    // ── Remove ──────────────────────────────────────────────────────────────

    pub fn delete_statement(&self, parts: &[Part], matching: Match) -> Statement {
        self.delete_where(where_clause(parts, matching))
    }

    fn delete_where(&self, (filter, params): (String, Vec<Value>)) -> Statement {
        Statement {
            sql: format!("DELETE FROM {}{}", self.name, filter),
            params,
        }
    }

    /// Deletes matching rows and returns how many went. With every part
    /// omitted this empties the table.
    pub fn remove(
        &self,
        parts: &[Part],
        matching: Match,
        conn: Option<&Connection>,
    ) -> Result<usize, DbError> {
        let filter = where_clause(parts, matching);
        if filter.0.is_empty() {
            log::warn!("{}: delete without filter removes every row", self.name);
        }
        let statement = self.delete_where(filter);
        self.db.scoped(conn, |conn| execute(conn, &statement))
    }

    // ── Edit ────────────────────────────────────────────────────────────────

    /// Prepares an update from the parts to assign. Fails with
    /// [`DbError::NoChanges`] if every part is omitted.
    pub fn edit(&self, parts: &[Part]) -> Result<PreparedUpdate<'_>, DbError> {
        Ok(PreparedUpdate {
            table: self,
            set: build_set(parts)?,
        })
    }
}

/// An update whose SET clause is fixed; apply it to any number of filters.
#[derive(Debug, Clone)]
pub struct PreparedUpdate<'t> {
    table: &'t Table,
    set: Clauses,
}

impl PreparedUpdate<'_> {
    /// The `a=?,b=?` text shared by every application.
    pub fn set_clause(&self) -> String {
        self.set.join(",")
    }

    pub fn statement(&self, parts: &[Part], matching: Match) -> Statement {
        self.update_where(where_clause(parts, matching))
    }

    fn update_where(&self, (filter, where_params): (String, Vec<Value>)) -> Statement {
        let mut params = self.set.params.clone();
        params.extend(where_params);
        Statement {
            sql: format!("UPDATE {} SET {}{}", self.table.name, self.set_clause(), filter),
            params,
        }
    }

    /// Updates the rows matching `parts` and returns how many changed.
    pub fn apply(
        &self,
        parts: &[Part],
        matching: Match,
        conn: Option<&Connection>,
    ) -> Result<usize, DbError> {
        let filter = where_clause(parts, matching);
        if filter.0.is_empty() {
            log::warn!("{}: update without filter changes every row", self.table.name);
        }
        let statement = self.update_where(filter);
        self.table.db.scoped(conn, |conn| execute(conn, &statement))
    }
}

fn execute(conn: &Connection, statement: &Statement) -> Result<usize, DbError> {
    log::debug!("{} [{} params]", statement.sql, statement.params.len());
    Ok(conn.execute(&statement.sql, params_from_iter(statement.params.iter()))?)
}
