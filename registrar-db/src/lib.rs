//! Query construction over SQLite tables built from optional, typed parts.
//!
//! Callers describe an operation as a list of [`Part`]s, one per column.
//! Each part carries a value or a filter [`Expr`], or is
//! [`Param::Omitted`] and drops out of the statement entirely. Values pass
//! through the column's codec on the way in and out, which lets lists and
//! mappings live in single TEXT columns (see [`codec`]).

pub mod builder;
pub mod codec;
pub mod column;
pub mod connection;
pub mod error;
pub mod expr;
pub mod param;
pub mod table;

pub use builder::{
    Clauses, Match, Statement, build_insert, build_set, build_where, decompile_row, where_clause,
};
pub use codec::{Coerced, Coercion, Compiler, Decompiler, ListCodec, MapCodec, Nullable, Plain};
pub use column::{Column, DecodedRow, FromRow, Part};
pub use connection::Database;
pub use error::{CodecError, DbError};
pub use expr::{
    Collation, Comparison, Expr, Filter, and_, between, collate_binary, collate_nocase,
    collate_rtrim, custom, greater_than, greater_than_or_equal, is_, is_not, less_than,
    less_than_or_equal, nocase_substr, or_, substr,
};
pub use param::Param;
pub use table::{PreparedUpdate, Table};

// Re-exported so callers can pass connections and raw values without
// depending on rusqlite directly.
pub use rusqlite::{Connection, Transaction, types::Value};
