//! Predicate expressions.
//!
//! An [`Expr`] knows how to render itself against a column: it produces an
//! SQL boolean fragment with `?` placeholders and pushes the bound values,
//! already compiled by the column's [`Compiler`], in placeholder order.
//!
//! A plain value given where a filter is expected becomes [`Expr::Is`].
//!
//! ```
//! use registrar_db::codec::Plain;
//! use registrar_db::expr::*;
//!
//! let mut params = Vec::new();
//! let sql = between(10_i64, 20).to_sql("score", &Plain, &mut params);
//! assert_eq!(sql, "score BETWEEN ? AND ?");
//! ```

use std::ops::Not;

use rusqlite::types::Value;

use crate::codec::Compiler;
use crate::param::Param;

/// A filter for one column: an expression, or omitted.
pub type Filter<T> = Param<Expr<T>>;

/// Collation applied by the collated-equality variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
    Nocase,
    Binary,
    Rtrim,
}

impl Collation {
    pub fn as_sql(self) -> &'static str {
        match self {
            Collation::Nocase => "NOCASE",
            Collation::Binary => "BINARY",
            Collation::Rtrim => "RTRIM",
        }
    }
}

/// Ordering comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

/// A predicate over a single column holding values of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<T> {
    /// `col IS ?`
    Is(T),
    /// `col IS NOT ?`
    IsNot(T),
    /// `NOT (<inner>)`
    Not(Box<Expr<T>>),
    /// `col IS ? COLLATE <mode>`
    Collate(T, Collation),
    /// `instr(col, ?)`, case-sensitive substring.
    Substr(T),
    /// `col LIKE '%'||?||'%' ESCAPE '\'`, case-insensitive substring.
    NocaseSubstr(T),
    /// `col BETWEEN ? AND ?`
    Between(T, T),
    /// `col <op> ?`
    Compare(Comparison, T),
    /// Sub-predicates over the same column joined with `AND`.
    And(Vec<Expr<T>>),
    /// Sub-predicates over the same column joined with `OR`.
    Or(Vec<Expr<T>>),
    /// Verbatim SQL and parameters. Ignores the column and its compiler.
    Custom(String, Vec<Value>),
}

impl<T> Expr<T> {
    /// A combinator with no live branches left, or the negation of one.
    /// Treated like an omitted filter wherever it appears.
    pub fn is_vacuous(&self) -> bool {
        match self {
            Expr::And(items) | Expr::Or(items) => items.iter().all(Expr::is_vacuous),
            Expr::Not(inner) => inner.is_vacuous(),
            _ => false,
        }
    }

    /// Renders this predicate against `column`, appending bound values to
    /// `params` in placeholder order.
    pub fn to_sql(
        &self,
        column: &str,
        compiler: &dyn Compiler<T>,
        params: &mut Vec<Value>,
    ) -> String {
        match self {
            Expr::Is(v) => {
                params.push(compiler.compile(v));
                format!("{column} IS ?")
            }
            Expr::IsNot(v) => {
                params.push(compiler.compile(v));
                format!("{column} IS NOT ?")
            }
            Expr::Not(inner) => format!("NOT ({})", inner.to_sql(column, compiler, params)),
            Expr::Collate(v, collation) => {
                params.push(compiler.compile(v));
                format!("{column} IS ? COLLATE {}", collation.as_sql())
            }
            Expr::Substr(v) => {
                params.push(compiler.compile(v));
                format!("instr({column}, ?)")
            }
            Expr::NocaseSubstr(v) => {
                params.push(compiler.compile(v));
                format!("{column} LIKE '%'||?||'%' ESCAPE '\\'")
            }
            Expr::Between(low, high) => {
                params.push(compiler.compile(low));
                params.push(compiler.compile(high));
                format!("{column} BETWEEN ? AND ?")
            }
            Expr::Compare(op, v) => {
                params.push(compiler.compile(v));
                format!("{column} {} ?", op.as_sql())
            }
            Expr::And(items) => join(items, " AND ", column, compiler, params),
            Expr::Or(items) => join(items, " OR ", column, compiler, params),
            Expr::Custom(sql, custom_params) => {
                params.extend(custom_params.iter().cloned());
                sql.clone()
            }
        }
    }
}

// Vacuous branches are skipped. A lone surviving branch renders bare so that
// a combinator with one live branch is indistinguishable from that branch.
fn join<T>(
    items: &[Expr<T>],
    separator: &str,
    column: &str,
    compiler: &dyn Compiler<T>,
    params: &mut Vec<Value>,
) -> String {
    let fragments: Vec<String> = items
        .iter()
        .filter(|item| !item.is_vacuous())
        .map(|item| item.to_sql(column, compiler, params))
        .collect();
    match fragments.as_slice() {
        [single] => single.clone(),
        _ => format!("({})", fragments.join(separator)),
    }
}

impl<T> From<T> for Param<Expr<T>> {
    fn from(value: T) -> Self {
        Param::Given(Expr::Is(value))
    }
}

impl From<&str> for Param<Expr<String>> {
    fn from(value: &str) -> Self {
        Param::Given(Expr::Is(value.to_string()))
    }
}

impl<T> Not for Expr<T> {
    type Output = Expr<T>;

    fn not(self) -> Expr<T> {
        Expr::Not(Box::new(self))
    }
}

impl<T> Not for Param<Expr<T>> {
    type Output = Param<Expr<T>>;

    fn not(self) -> Param<Expr<T>> {
        self.map(Not::not)
    }
}

/// Column is equal to `value`.
pub fn is_<T>(value: T) -> Expr<T> {
    Expr::Is(value)
}

/// Column is not equal to `value`. Use `!expr` to negate an expression.
pub fn is_not<T>(value: T) -> Expr<T> {
    Expr::IsNot(value)
}

/// Column equals `value` under case-insensitive comparison.
pub fn collate_nocase<T>(value: T) -> Expr<T> {
    Expr::Collate(value, Collation::Nocase)
}

/// Column equals `value` under byte-wise comparison.
pub fn collate_binary<T>(value: T) -> Expr<T> {
    Expr::Collate(value, Collation::Binary)
}

/// Column equals `value` ignoring trailing spaces.
pub fn collate_rtrim<T>(value: T) -> Expr<T> {
    Expr::Collate(value, Collation::Rtrim)
}

/// `value` occurs in the column (case-sensitive).
pub fn substr<T>(value: T) -> Expr<T> {
    Expr::Substr(value)
}

/// `value` occurs in the column (case-insensitive). `%` and `_` in `value`
/// keep their `LIKE` meaning.
pub fn nocase_substr<T>(value: T) -> Expr<T> {
    Expr::NocaseSubstr(value)
}

/// Column lies in `[low, high]`.
pub fn between<T>(low: T, high: T) -> Expr<T> {
    Expr::Between(low, high)
}

pub fn greater_than<T>(value: T) -> Expr<T> {
    Expr::Compare(Comparison::Gt, value)
}

pub fn greater_than_or_equal<T>(value: T) -> Expr<T> {
    Expr::Compare(Comparison::Gte, value)
}

pub fn less_than<T>(value: T) -> Expr<T> {
    Expr::Compare(Comparison::Lt, value)
}

pub fn less_than_or_equal<T>(value: T) -> Expr<T> {
    Expr::Compare(Comparison::Lte, value)
}

/// All given filters hold. Omitted branches are dropped; if none remain the
/// whole combinator is omitted.
pub fn and_<T>(values: impl IntoIterator<Item = Filter<T>>) -> Filter<T> {
    combine(values, Expr::And)
}

/// Any given filter holds. Omitted branches are dropped; if none remain the
/// whole combinator is omitted.
pub fn or_<T>(values: impl IntoIterator<Item = Filter<T>>) -> Filter<T> {
    combine(values, Expr::Or)
}

fn combine<T>(
    values: impl IntoIterator<Item = Filter<T>>,
    build: fn(Vec<Expr<T>>) -> Expr<T>,
) -> Filter<T> {
    let mut live: Vec<Expr<T>> = values
        .into_iter()
        .filter_map(Param::given)
        .filter(|expr| !expr.is_vacuous())
        .collect();
    match live.len() {
        0 => Param::Omitted,
        1 => live.pop().map_or(Param::Omitted, Param::Given),
        _ => Param::Given(build(live)),
    }
}

/// Raw SQL with its own parameters, used verbatim.
pub fn custom<T>(sql: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Expr<T> {
    Expr::Custom(sql.into(), params.into_iter().collect())
}
