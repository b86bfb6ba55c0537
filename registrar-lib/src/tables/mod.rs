//! Record façades: one typed wrapper per table.
//!
//! Each façade lists its columns once, in table order, and derives from
//! them a `*Filter` struct for reads, deletes and update targets, a
//! `*Changes` struct for updates, and the row mapping into its record type.
//! Only `add` (and the odd extra) is written by hand.

use std::marker::PhantomData;

use registrar_db::{Connection, Match, Part, PreparedUpdate, Statement};

use crate::error::RegistrarError;

pub mod games;
pub mod serieses;
pub mod teams;
pub mod users;

pub use games::{GameChanges, GameFilter, Games, NewGame};
pub use serieses::{NewSeries, Serieses, SeriesChanges, SeriesFilter};
pub use teams::{TeamChanges, TeamFilter, Teams};
pub use users::{UserChanges, UserFilter, Users};

/// A filter struct that can be turned into one part per table column.
pub trait RecordFilter {
    fn parts(&self) -> Vec<Part>;
}

/// An update with fixed assignments, applied to rows chosen by a filter.
#[derive(Debug)]
pub struct RecordUpdate<'t, F> {
    update: PreparedUpdate<'t>,
    _filter: PhantomData<fn(&F)>,
}

impl<'t, F: RecordFilter> RecordUpdate<'t, F> {
    pub(crate) fn new(update: PreparedUpdate<'t>) -> Self {
        Self {
            update,
            _filter: PhantomData,
        }
    }

    pub fn set_clause(&self) -> String {
        self.update.set_clause()
    }

    pub fn statement(&self, filter: &F, matching: Match) -> Statement {
        self.update.statement(&filter.parts(), matching)
    }

    /// Runs the update on the rows `filter` selects. Returns the number of
    /// rows changed.
    pub fn apply(
        &self,
        filter: &F,
        matching: Match,
        conn: Option<&Connection>,
    ) -> Result<usize, RegistrarError> {
        Ok(self.update.apply(&filter.parts(), matching, conn)?)
    }
}

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Generates the filter and changes structs for a record type plus the
/// façade struct with its row mapping and read/remove/edit operations.
macro_rules! record_table {
    (
        $(#[$meta:meta])*
        $facade:ident for $record:ident in $table:literal {
            filter: $filter:ident,
            changes: $changes:ident,
            fields: {
                $($field:ident: $ty:ty = $column:ident),* $(,)?
            }
        }
    ) => {
        #[doc = concat!("Row selection over `", $table, "`. Every field defaults to omitted.")]
        #[derive(Debug, Clone, Default)]
        pub struct $filter {
            $(pub $field: registrar_db::Filter<$ty>,)*
        }

        impl $crate::tables::RecordFilter for $filter {
            fn parts(&self) -> Vec<registrar_db::Part> {
                vec![$($column.part(self.$field.clone()),)*]
            }
        }

        #[doc = concat!("Assignments for an update of `", $table, "`. Omitted fields are left alone.")]
        #[derive(Debug, Clone, Default)]
        pub struct $changes {
            $(pub $field: registrar_db::Param<$ty>,)*
        }

        impl $changes {
            pub fn parts(&self) -> Vec<registrar_db::Part> {
                vec![$($column.set(self.$field.clone()),)*]
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $facade {
            table: registrar_db::Table,
        }

        impl $facade {
            pub const TABLE: &'static str = $table;

            pub fn new(db: registrar_db::Database) -> Self {
                Self {
                    table: registrar_db::Table::new(db, $table),
                }
            }

            pub fn table(&self) -> &registrar_db::Table {
                &self.table
            }

            /// Builds a record from a row decoded through the filter's parts.
            pub fn record_from_row(
                mut row: registrar_db::DecodedRow,
            ) -> Result<$record, registrar_db::DbError> {
                Ok($record {
                    $($field: row.take()?,)*
                })
            }

            fn records(
                rows: Vec<registrar_db::DecodedRow>,
            ) -> Result<Vec<$record>, $crate::RegistrarError> {
                let records = rows
                    .into_iter()
                    .map(Self::record_from_row)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(records)
            }

            pub fn select_statement(
                &self,
                filter: &$filter,
                matching: registrar_db::Match,
            ) -> registrar_db::Statement {
                let parts = $crate::tables::RecordFilter::parts(filter);
                self.table.select_statement(&parts, matching)
            }

            /// Rows matching `filter`, at most `batch` of them.
            pub fn get(
                &self,
                filter: &$filter,
                batch: Option<usize>,
                matching: registrar_db::Match,
            ) -> Result<Vec<$record>, $crate::RegistrarError> {
                let parts = $crate::tables::RecordFilter::parts(filter);
                Self::records(self.table.get(&parts, batch, matching)?)
            }

            pub fn get_one(
                &self,
                filter: &$filter,
                matching: registrar_db::Match,
            ) -> Result<Option<$record>, $crate::RegistrarError> {
                let parts = $crate::tables::RecordFilter::parts(filter);
                let row: Option<registrar_db::DecodedRow> = self.table.get_one(&parts, matching)?;
                Ok(row.map(Self::record_from_row).transpose()?)
            }

            /// Like [`get`](Self::get), on a connection the caller owns.
            pub fn fetch(
                &self,
                conn: &registrar_db::Connection,
                filter: &$filter,
                batch: Option<usize>,
                matching: registrar_db::Match,
            ) -> Result<Vec<$record>, $crate::RegistrarError> {
                let parts = $crate::tables::RecordFilter::parts(filter);
                Self::records(self.table.fetch(conn, &parts, batch, matching)?)
            }

            pub fn delete_statement(
                &self,
                filter: &$filter,
                matching: registrar_db::Match,
            ) -> registrar_db::Statement {
                let parts = $crate::tables::RecordFilter::parts(filter);
                self.table.delete_statement(&parts, matching)
            }

            /// Deletes the rows matching `filter` and returns how many went.
            pub fn remove(
                &self,
                filter: &$filter,
                matching: registrar_db::Match,
                conn: Option<&registrar_db::Connection>,
            ) -> Result<usize, $crate::RegistrarError> {
                let parts = $crate::tables::RecordFilter::parts(filter);
                Ok(self.table.remove(&parts, matching, conn)?)
            }

            /// Prepares an update assigning every given field of `changes`.
            pub fn edit(
                &self,
                changes: &$changes,
            ) -> Result<$crate::tables::RecordUpdate<'_, $filter>, $crate::RegistrarError> {
                let update = self.table.edit(&changes.parts())?;
                Ok($crate::tables::RecordUpdate::new(update))
            }
        }
    };
}

pub(crate) use record_table;
