//! Table creation.

use registrar_db::{Connection, Database, DbError};

/// Create all tables if they don't exist. Safe to run on an existing database.
pub fn ensure_tables(db: &Database) -> Result<(), DbError> {
    db.with_transaction(create_schema)
}

/// Runs the schema script on an existing connection.
pub fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA_SQL)?;
    log::debug!("schema ensured");
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS USERS (
    user_id            INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    active             INTEGER NOT NULL DEFAULT 1,
    timestamp          INTEGER NOT NULL,
    discord_id         TEXT NOT NULL,
    username           TEXT NOT NULL,
    previous_usernames TEXT,
    num_name_changes   INTEGER NOT NULL DEFAULT 0,
    team               INTEGER
);

CREATE TABLE IF NOT EXISTS TEAMS (
    id     INTEGER NOT NULL,
    name   TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS SERIESES (
    series_id    INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    specifiers   TEXT,
    active       INTEGER NOT NULL DEFAULT 1,
    timestamp    INTEGER NOT NULL,
    game_ids     TEXT NOT NULL,
    team_1_id    INTEGER NOT NULL,
    team_2_id    INTEGER NOT NULL,
    team_1_score INTEGER NOT NULL,
    team_2_score INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS GAMES (
    game_id         INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    active          INTEGER NOT NULL DEFAULT 1,
    timestamp       INTEGER NOT NULL,
    series_id       INTEGER NOT NULL,
    team_1_id       INTEGER NOT NULL,
    team_2_id       INTEGER NOT NULL,
    team_1_score    INTEGER NOT NULL,
    team_2_score    INTEGER NOT NULL,
    team_1_user_ids TEXT NOT NULL,
    team_2_user_ids TEXT NOT NULL
);
"#;
