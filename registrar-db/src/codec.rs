//! Value codecs: how a logical value is stored in a column and read back.
//!
//! A [`Compiler`] turns a logical value into a storage [`Value`]; a
//! [`Decompiler`] reverses it. [`Plain`] is the identity pair for anything
//! SQLite stores natively.
//!
//! The composite codecs flatten a list or a mapping into one TEXT column:
//!
//! ```text
//! list:    \u{86}a\u{87}\u{82}\u{86}b\u{87}
//! mapping: \u{86}k\u{83}v\u{87}\u{82}\u{86}k2\u{83}v2\u{87}
//! ```
//!
//! This layout is persisted on disk and must not change. Item text is never
//! escaped: a value containing one of the four reserved control characters
//! is silently corrupted on the way back. Keeping them out is the caller's job.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use rusqlite::types::{FromSql, Value, ValueRef};

use crate::error::CodecError;

/// Separates items (code point 130).
pub const ITEM_SEP: char = '\u{82}';
/// Separates a key from its value inside a mapping item (code point 131).
pub const KV_SEP: char = '\u{83}';
/// Opens an item (code point 134).
pub const WRAP_OPEN: char = '\u{86}';
/// Closes an item (code point 135).
pub const WRAP_CLOSE: char = '\u{87}';

/// Converts a logical value into its storage form.
pub trait Compiler<T> {
    fn compile(&self, value: &T) -> Value;
}

/// Converts a storage value back into its logical form.
pub trait Decompiler<T> {
    fn decompile(&self, value: Value) -> Result<T, CodecError>;
}

/// Identity codec: the value is bound and read as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl<T: Clone + Into<Value>> Compiler<T> for Plain {
    fn compile(&self, value: &T) -> Value {
        value.clone().into()
    }
}

impl<T: FromSql> Decompiler<T> for Plain {
    fn decompile(&self, value: Value) -> Result<T, CodecError> {
        Ok(T::column_result(ValueRef::from(&value))?)
    }
}

/// Ordered sequence stored as wrapped, separated items.
///
/// An empty list compiles to the empty string; both the empty string and
/// `NULL` decompile to an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec;

impl<T: Display> Compiler<Vec<T>> for ListCodec {
    fn compile(&self, value: &Vec<T>) -> Value {
        Value::Text(join_items(value.iter().map(ToString::to_string)))
    }
}

impl<T: FromStr> Decompiler<Vec<T>> for ListCodec {
    fn decompile(&self, value: Value) -> Result<Vec<T>, CodecError> {
        match stored_text(value)? {
            Some(text) if !text.is_empty() => split_items(&text).map(parse_item).collect(),
            _ => Ok(Vec::new()),
        }
    }
}

/// Key/value mapping stored like a list whose items are `key KV_SEP value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapCodec;

impl<K: Display, V: Display> Compiler<BTreeMap<K, V>> for MapCodec {
    fn compile(&self, value: &BTreeMap<K, V>) -> Value {
        Value::Text(join_items(
            value.iter().map(|(k, v)| format!("{k}{KV_SEP}{v}")),
        ))
    }
}

impl<K: FromStr + Ord, V: FromStr> Decompiler<BTreeMap<K, V>> for MapCodec {
    fn decompile(&self, value: Value) -> Result<BTreeMap<K, V>, CodecError> {
        let text = match stored_text(value)? {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(BTreeMap::new()),
        };
        split_items(&text)
            .map(|item| {
                let (k, v) = item.split_once(KV_SEP).ok_or_else(|| CodecError::Coerce {
                    text: item.to_string(),
                    target: "key/value pair",
                })?;
                Ok((parse_item(k)?, parse_item(v)?))
            })
            .collect()
    }
}

/// Wraps another codec so that `None` is stored as `NULL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nullable<C>(pub C);

impl<T, C: Compiler<T>> Compiler<Option<T>> for Nullable<C> {
    fn compile(&self, value: &Option<T>) -> Value {
        match value {
            Some(v) => self.0.compile(v),
            None => Value::Null,
        }
    }
}

impl<T, C: Decompiler<T>> Decompiler<Option<T>> for Nullable<C> {
    fn decompile(&self, value: Value) -> Result<Option<T>, CodecError> {
        match value {
            Value::Null => Ok(None),
            other => self.0.decompile(other).map(Some),
        }
    }
}

/// Storage type an item of a [`Coerced`] list is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Integer,
    Real,
    Bool,
}

impl Coercion {
    fn apply(self, text: &str) -> Result<Value, CodecError> {
        let fail = |target| CodecError::Coerce {
            text: text.to_string(),
            target,
        };
        match self {
            Coercion::Text => Ok(Value::Text(text.to_string())),
            Coercion::Integer => text
                .parse()
                .map(Value::Integer)
                .map_err(|_| fail("integer")),
            Coercion::Real => text.parse().map(Value::Real).map_err(|_| fail("real")),
            Coercion::Bool => match text {
                "1" | "true" | "True" => Ok(Value::Integer(1)),
                "0" | "false" | "False" => Ok(Value::Integer(0)),
                _ => Err(fail("bool")),
            },
        }
    }
}

/// A list of mixed item types.
///
/// Items are coerced positionally; when the list is longer than the
/// coercion sequence, the last coercion covers the remaining items. With no
/// coercions at all every item stays text.
#[derive(Debug, Clone, Default)]
pub struct Coerced {
    coercions: Vec<Coercion>,
}

impl Coerced {
    pub fn new(coercions: impl IntoIterator<Item = Coercion>) -> Self {
        Self {
            coercions: coercions.into_iter().collect(),
        }
    }

    fn coercion_at(&self, index: usize) -> Coercion {
        self.coercions
            .get(index)
            .or(self.coercions.last())
            .copied()
            .unwrap_or(Coercion::Text)
    }
}

impl Compiler<Vec<Value>> for Coerced {
    fn compile(&self, value: &Vec<Value>) -> Value {
        Value::Text(join_items(value.iter().map(value_text)))
    }
}

impl Decompiler<Vec<Value>> for Coerced {
    fn decompile(&self, value: Value) -> Result<Vec<Value>, CodecError> {
        match stored_text(value)? {
            Some(text) if !text.is_empty() => split_items(&text)
                .enumerate()
                .map(|(i, item)| self.coercion_at(i).apply(item))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }
}

fn join_items(items: impl Iterator<Item = String>) -> String {
    let mut out = String::new();
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(ITEM_SEP);
        }
        out.push(WRAP_OPEN);
        out.push_str(&item);
        out.push(WRAP_CLOSE);
    }
    out
}

// Drops the first and last character of every piece without checking that
// they are the wrap markers.
fn split_items(text: &str) -> impl Iterator<Item = &str> {
    text.split(ITEM_SEP).map(|piece| {
        let mut chars = piece.chars();
        chars.next();
        chars.next_back();
        chars.as_str()
    })
}

fn parse_item<T: FromStr>(text: &str) -> Result<T, CodecError> {
    text.parse().map_err(|_| CodecError::Coerce {
        text: text.to_string(),
        target: std::any::type_name::<T>(),
    })
}

fn stored_text(value: Value) -> Result<Option<String>, CodecError> {
    match value {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text)),
        other => Err(CodecError::UnexpectedType {
            expected: "TEXT",
            found: storage_kind(&other),
        }),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

pub(crate) fn storage_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Integer(_) => "INTEGER",
        Value::Real(_) => "REAL",
        Value::Text(_) => "TEXT",
        Value::Blob(_) => "BLOB",
    }
}
