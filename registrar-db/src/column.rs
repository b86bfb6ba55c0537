//! Column descriptors and the type-erased parts built from them.
//!
//! A [`Column`] names a column and fixes its logical type and codec. Giving
//! it a value produces a [`Part`], which is what the statement builder and
//! the [`Table`](crate::Table) operations consume. Parts of different
//! logical types sit side by side in one slice.

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use rusqlite::types::Value;

use crate::codec::{Compiler, Decompiler, Plain};
use crate::error::DbError;
use crate::expr::{Expr, Filter};
use crate::param::Param;

/// A typed column: name plus the codec used to store `T`.
pub struct Column<T, C = Plain> {
    name: &'static str,
    codec: C,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Column<T, Plain> {
    pub const fn new(name: &'static str) -> Self {
        Self::with_codec(name, Plain)
    }
}

impl<T, C> Column<T, C> {
    pub const fn with_codec(name: &'static str, codec: C) -> Self {
        Self {
            name,
            codec,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<T, C> Column<T, C>
where
    T: 'static,
    C: Compiler<T> + Decompiler<T> + Clone + 'static,
{
    /// Binds a filter (or a plain value, or [`Param::Omitted`]) to this column.
    pub fn part(&self, value: impl Into<Filter<T>>) -> Part {
        Part::new(self.name, value, self.codec.clone())
    }

    /// Binds a value to write. Omitted values drop the column from the statement.
    pub fn set(&self, value: impl Into<Param<T>>) -> Part {
        self.part(value.into().map(Expr::Is))
    }

    /// A part that takes no part in filtering; used to decode the column.
    pub fn omitted(&self) -> Part {
        self.part(Param::Omitted)
    }
}

impl<T, C: fmt::Debug> fmt::Debug for Column<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .field("codec", &self.codec)
            .finish()
    }
}

/// One column's share of a statement: its name, its value or filter, and
/// the codec to compile and decompile with.
pub struct Part {
    column: &'static str,
    operand: Box<dyn Operand>,
}

impl Part {
    pub fn new<T, C>(column: &'static str, value: impl Into<Filter<T>>, codec: C) -> Self
    where
        T: 'static,
        C: Compiler<T> + Decompiler<T> + 'static,
    {
        Self {
            column,
            operand: Box::new(Bound {
                filter: value.into(),
                codec,
            }),
        }
    }

    /// A part with the identity codec.
    pub fn plain<T>(column: &'static str, value: impl Into<Filter<T>>) -> Self
    where
        T: 'static,
        Plain: Compiler<T> + Decompiler<T>,
    {
        Self::new(column, value, Plain)
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn is_omitted(&self) -> bool {
        self.operand.is_omitted()
    }

    /// The WHERE fragment for this part, or `None` when omitted.
    pub fn where_sql(&self, params: &mut Vec<Value>) -> Option<String> {
        self.operand.where_sql(self.column, params)
    }

    /// The compiled value to write, or `None` when omitted.
    pub fn value(&self) -> Result<Option<Value>, DbError> {
        self.operand.value(self.column)
    }

    pub(crate) fn decompile(&self, raw: Value) -> Result<Box<dyn Any>, DbError> {
        self.operand.decompile(self.column, raw)
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("column", &self.column)
            .field("omitted", &self.is_omitted())
            .finish_non_exhaustive()
    }
}

trait Operand {
    fn is_omitted(&self) -> bool;
    fn where_sql(&self, column: &str, params: &mut Vec<Value>) -> Option<String>;
    fn value(&self, column: &str) -> Result<Option<Value>, DbError>;
    fn decompile(&self, column: &str, raw: Value) -> Result<Box<dyn Any>, DbError>;
}

struct Bound<T, C> {
    filter: Filter<T>,
    codec: C,
}

impl<T, C> Operand for Bound<T, C>
where
    T: 'static,
    C: Compiler<T> + Decompiler<T>,
{
    fn is_omitted(&self) -> bool {
        match &self.filter {
            Param::Omitted => true,
            Param::Given(expr) => expr.is_vacuous(),
        }
    }

    fn where_sql(&self, column: &str, params: &mut Vec<Value>) -> Option<String> {
        match &self.filter {
            Param::Given(expr) if !expr.is_vacuous() => {
                Some(expr.to_sql(column, &self.codec, params))
            }
            _ => None,
        }
    }

    fn value(&self, column: &str) -> Result<Option<Value>, DbError> {
        match &self.filter {
            Param::Omitted => Ok(None),
            Param::Given(Expr::Is(v)) => Ok(Some(self.codec.compile(v))),
            Param::Given(_) => Err(DbError::NotAValue {
                column: column.to_string(),
            }),
        }
    }

    fn decompile(&self, column: &str, raw: Value) -> Result<Box<dyn Any>, DbError> {
        let value: T = self
            .codec
            .decompile(raw)
            .map_err(|e| DbError::decode(column, e.to_string()))?;
        Ok(Box::new(value))
    }
}

/// A row whose columns have been run through their parts' decompilers.
///
/// Cells are taken in column order with [`DecodedRow::take`].
pub struct DecodedRow {
    cells: std::vec::IntoIter<(&'static str, Box<dyn Any>)>,
}

impl DecodedRow {
    pub(crate) fn new(cells: Vec<(&'static str, Box<dyn Any>)>) -> Self {
        Self {
            cells: cells.into_iter(),
        }
    }

    /// Cells not yet taken.
    pub fn remaining(&self) -> usize {
        self.cells.len()
    }

    /// Takes the next cell as a `T`.
    pub fn take<T: 'static>(&mut self) -> Result<T, DbError> {
        let (column, cell) = self
            .cells
            .next()
            .ok_or_else(|| DbError::decode("<end of row>", "no cells left"))?;
        cell.downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| DbError::decode(column, format!("expected {}", type_name::<T>())))
    }
}

impl fmt::Debug for DecodedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.cells.as_slice().iter().map(|(column, _)| column))
            .finish()
    }
}

/// Builds a record from a decoded row, taking cells in column order.
pub trait FromRow: Sized {
    fn from_row(row: DecodedRow) -> Result<Self, DbError>;
}

impl FromRow for DecodedRow {
    fn from_row(row: DecodedRow) -> Result<Self, DbError> {
        Ok(row)
    }
}
