//! Runtime value model
//!
//! This module defines the `Value` enum: the minimal runtime vocabulary the
//! semantic core needs for value-conformance checks. Physical execution owns
//! the full runtime representation; this model only has to answer "what kind
//! of value is this" and expose enough structure for `is_instance`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::type_system::ValueKind;

/// A runtime value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// Null value (known to be absent)
    Null,
    /// Missing value (no binding at all; distinct from null)
    Missing,
    /// Boolean value
    Bool(bool),
    /// Integer value (one runtime representation for all integer subtypes)
    Int(i64),
    /// Approximate numeric value
    Float(f64),
    /// Exact numeric value
    Decimal(Decimal),
    /// Unicode string
    String(String),
    /// Symbol (interned-text kind, distinct from string)
    Symbol(String),
    /// Character large object
    Clob(Vec<u8>),
    /// Binary large object
    Blob(Vec<u8>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Instant with offset
    Timestamp(DateTime<FixedOffset>),
    /// Ordered collection
    List(Vec<Value>),
    /// Unordered collection
    Bag(Vec<Value>),
    /// S-expression collection
    Sexp(Vec<Value>),
    /// Struct with ordered entries; duplicate and non-text keys are legal
    Struct(StructValue),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create a symbol value
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    /// Create a list value
    pub fn list(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::List(elements.into_iter().collect())
    }

    /// Create a bag value
    pub fn bag(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Bag(elements.into_iter().collect())
    }

    /// Create a sexp value
    pub fn sexp(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Sexp(elements.into_iter().collect())
    }

    /// Get the runtime kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Missing => ValueKind::Missing,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Clob(_) => ValueKind::Clob,
            Self::Blob(_) => ValueKind::Blob,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::List(_) => ValueKind::List,
            Self::Bag(_) => ValueKind::Bag,
            Self::Sexp(_) => ValueKind::Sexp,
            Self::Struct(_) => ValueKind::Struct,
        }
    }

    /// Check if this value is null or missing
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Missing)
    }

    /// Get the text content if this is a string or symbol
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get the collection elements if this is a list, bag, or sexp
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) | Self::Bag(v) | Self::Sexp(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Missing => write!(f, "MISSING"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Symbol(s) => write!(f, "`{s}`"),
            Self::Clob(b) => write!(f, "{{{{clob {} bytes}}}}", b.len()),
            Self::Blob(b) => write!(f, "{{{{blob {} bytes}}}}", b.len()),
            Self::Date(d) => write!(f, "DATE '{d}'"),
            Self::Time(t) => write!(f, "TIME '{t}'"),
            Self::Timestamp(ts) => write!(f, "TIMESTAMP '{}'", ts.to_rfc3339()),
            Self::List(v) => write_sequence(f, "[", v, "]"),
            Self::Bag(v) => write_sequence(f, "<<", v, ">>"),
            Self::Sexp(v) => write_sequence(f, "(", v, ")"),
            Self::Struct(s) => write!(f, "{s}"),
        }
    }
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    elements: &[Value],
    close: &str,
) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, v) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, "{close}")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A runtime struct value
///
/// Entries are ordered and keys are full values: duplicate field names are
/// legal and tracked, and non-text keys are representable (conformance
/// checking rejects them, but the model must be able to carry them).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructValue {
    /// Ordered (key, value) entries
    pub entries: Vec<(Value, Value)>,
}

impl StructValue {
    /// Create an empty struct
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text-keyed field
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entries.push((Value::String(name.into()), value));
        self
    }

    /// Add an arbitrary-keyed entry
    pub fn with_entry(mut self, key: Value, value: Value) -> Self {
        self.entries.push((key, value));
        self
    }

    /// Get every value stored under a text key, in entry order
    pub fn values_for(&self, name: &str) -> impl Iterator<Item = &Value> {
        self.entries.iter().filter_map(move |(k, v)| {
            if k.as_text() == Some(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    /// Number of entries, counting duplicates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the struct has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, Value)> for StructValue {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (Value::String(k), v))
                .collect(),
        }
    }
}
