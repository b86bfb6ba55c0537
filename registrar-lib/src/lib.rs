//! League registrar: users, teams, series and games stored in SQLite.
//!
//! [`Registrar`] opens the database and hands out one façade per table.
//! Every façade takes a typed filter struct whose fields default to
//! omitted, so only the fields that are set end up in the statement.

pub mod error;
pub mod registrar;
pub mod schema;
pub mod settings;
pub mod tables;

pub use error::RegistrarError;
pub use registrar::Registrar;
pub use tables::{
    GameChanges, GameFilter, Games, NewGame, NewSeries, RecordFilter, RecordUpdate, SeriesChanges,
    SeriesFilter, Serieses, TeamChanges, TeamFilter, Teams, UserChanges, UserFilter, Users,
};

// Re-exported so frontends can build filters without naming the lower crates.
pub use registrar_core::{Game, Series, Team, User};
pub use registrar_db::{Match, Param};
