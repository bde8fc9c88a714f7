//! Store-agnostic values exchanged with a [`Store`](crate::Store).

use std::collections::BTreeMap;

/// A positional query parameter.
///
/// Every variant carries an `Option` so a parameter can be bound as a typed
/// NULL; the SQL side casts the placeholder (`$1::bigint[]`, `$2::text`) and
/// tests it with `IS NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    BigInt(Option<i64>),
    BigIntArray(Option<Vec<i64>>),
    Text(Option<String>),
}

impl SqlParam {
    pub fn is_null(&self) -> bool {
        match self {
            SqlParam::BigInt(value) => value.is_none(),
            SqlParam::BigIntArray(value) => value.is_none(),
            SqlParam::Text(value) => value.is_none(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlParam::BigInt(value) => *value,
            _ => None,
        }
    }

    pub fn as_i64_slice(&self) -> Option<&[i64]> {
        match self {
            SqlParam::BigIntArray(value) => value.as_deref(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlParam::Text(value) => value.as_deref(),
            _ => None,
        }
    }
}

/// A decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// One result row, addressed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    columns: BTreeMap<String, SqlValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    /// Integer value of `column`; `None` when absent, NULL, or not an integer.
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            SqlValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Text value of `column`; `None` when absent, NULL, or not text.
    pub fn get_str(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            SqlValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
