//! The "omitted" marker.
//!
//! A [`Param`] is either a value the caller supplied or [`Param::Omitted`],
//! meaning the field takes no part in the statement at all. `Omitted` is not
//! `NULL`: to write or match `NULL`, give `Param::Given(None)` for an
//! `Option<T>` column.

/// A value that may have been left out of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param<T> {
    /// No value; the field is dropped from the statement.
    Omitted,
    /// A caller-supplied value.
    Given(T),
}

impl<T> Param<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Param::Omitted)
    }

    pub fn as_ref(&self) -> Param<&T> {
        match self {
            Param::Omitted => Param::Omitted,
            Param::Given(v) => Param::Given(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Param<U> {
        match self {
            Param::Omitted => Param::Omitted,
            Param::Given(v) => Param::Given(f(v)),
        }
    }

    /// Converts into an `Option`, losing the distinction the type exists for.
    /// Only meant for reading back what was given.
    pub fn given(self) -> Option<T> {
        match self {
            Param::Omitted => None,
            Param::Given(v) => Some(v),
        }
    }
}

// Written out so that `T` needs no `Default` of its own.
impl<T> Default for Param<T> {
    fn default() -> Self {
        Param::Omitted
    }
}

impl<T> From<T> for Param<T> {
    fn from(value: T) -> Self {
        Param::Given(value)
    }
}
