//! Statement building from parts.
//!
//! Every builder drops omitted parts before doing anything else. A WHERE
//! built only from omitted parts is empty, and the statement that uses it
//! targets the whole table.

use rusqlite::types::Value;

use crate::column::{DecodedRow, Part};
use crate::error::DbError;

/// How WHERE fragments are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Match {
    /// Every filter must hold (`AND`).
    #[default]
    All,
    /// Any filter may hold (`OR`).
    Any,
}

impl Match {
    pub fn separator(self) -> &'static str {
        match self {
            Match::All => " AND ",
            Match::Any => " OR ",
        }
    }
}

impl From<bool> for Match {
    fn from(match_all: bool) -> Self {
        if match_all { Match::All } else { Match::Any }
    }
}

/// Parallel lists of SQL fragments and their bound values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    pub fragments: Vec<String>,
    pub params: Vec<Value>,
}

impl Clauses {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn join(&self, separator: &str) -> String {
        self.fragments.join(separator)
    }
}

/// A finished SQL statement with positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Renders each non-omitted part as a predicate. Plain values become `IS`.
pub fn build_where(parts: &[Part]) -> Clauses {
    let mut clauses = Clauses::default();
    for part in parts {
        if let Some(fragment) = part.where_sql(&mut clauses.params) {
            clauses.fragments.push(fragment);
        }
    }
    clauses
}

/// Column names and compiled values of the non-omitted parts.
pub fn build_insert(parts: &[Part]) -> Result<Clauses, DbError> {
    let mut clauses = Clauses::default();
    for part in parts {
        if let Some(value) = part.value()? {
            clauses.fragments.push(part.column().to_string());
            clauses.params.push(value);
        }
    }
    Ok(clauses)
}

/// `col=?` assignments of the non-omitted parts.
///
/// Fails with [`DbError::NoChanges`] when nothing is left to assign.
pub fn build_set(parts: &[Part]) -> Result<Clauses, DbError> {
    let mut clauses = Clauses::default();
    for part in parts {
        if let Some(value) = part.value()? {
            clauses.fragments.push(format!("{}=?", part.column()));
            clauses.params.push(value);
        }
    }
    if clauses.is_empty() {
        return Err(DbError::NoChanges);
    }
    Ok(clauses)
}

/// ` WHERE ...` for the given parts, or an empty string if every part was omitted.
pub fn where_clause(parts: &[Part], matching: Match) -> (String, Vec<Value>) {
    let clauses = build_where(parts);
    if clauses.is_empty() {
        (String::new(), clauses.params)
    } else {
        (
            format!(" WHERE {}", clauses.join(matching.separator())),
            clauses.params,
        )
    }
}

/// Runs each raw column value through the decompiler of the part in the same
/// position. The row must have exactly one value per part.
pub fn decompile_row(values: Vec<Value>, parts: &[Part]) -> Result<DecodedRow, DbError> {
    if values.len() != parts.len() {
        return Err(DbError::ShapeMismatch {
            expected: parts.len(),
            actual: values.len(),
        });
    }
    let cells = values
        .into_iter()
        .zip(parts)
        .map(|(raw, part)| Ok((part.column(), part.decompile(raw)?)))
        .collect::<Result<Vec<_>, DbError>>()?;
    Ok(DecodedRow::new(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_from_bool() {
        assert_eq!(Match::from(true), Match::All);
        assert_eq!(Match::from(false), Match::Any);
        assert_eq!(Match::default().separator(), " AND ");
    }

    #[test]
    fn empty_where_clause_is_empty_string() {
        let (sql, params) = where_clause(&[], Match::All);
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }
}
