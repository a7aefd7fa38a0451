//! Literal AST nodes for AmberQL

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A literal value in an AmberQL expression
///
/// Ion-specific literal decoding happens in the parser; by the time a literal
/// reaches the semantic core it is already in this normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Null literal
    Null,
    /// Missing literal (absent value, distinct from null)
    Missing,
    /// Boolean literal (true/false)
    Boolean(bool),
    /// Integer literal
    Integer(i64),
    /// Decimal literal (exact numeric)
    Decimal(Decimal),
    /// Floating point literal (approximate numeric)
    Float(f64),
    /// String literal
    String(String),
    /// Symbol literal
    Symbol(String),
}

impl Literal {
    /// Check if this literal is null or missing
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Missing)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
