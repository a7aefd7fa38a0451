//! AmberQL Abstract Syntax Tree definitions
//!
//! This crate defines the AST vocabulary the semantic core consumes from the
//! parser: expressions, operators, literals, type references as written in
//! source, and EXCLUDE-clause path nodes.

mod exclude;
mod expression;
mod literal;
mod operator;
mod types;

pub use exclude::*;
pub use expression::*;
pub use literal::*;
pub use operator::*;
pub use types::*;

/// A node with source span information
pub type Spanned<T> = amberql_diagnostics::Spanned<T>;

/// Type alias for boxed expressions
pub type BoxExpr = Box<Spanned<Expr>>;

/// An identifier as written in source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The identifier text
    pub name: String,
    /// Whether this is a quoted (delimited) identifier
    pub quoted: bool,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: false,
        }
    }

    /// Create a quoted identifier
    pub fn quoted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: true,
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
