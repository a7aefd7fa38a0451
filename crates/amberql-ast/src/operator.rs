//! AmberQL operators with precedence information

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators with their precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Precedence 1 (lowest)
    /// Logical or
    Or,

    // Precedence 2
    /// Logical and
    And,

    // Precedence 3
    /// Equality
    Eq,
    /// Inequality
    NotEq,

    // Precedence 4
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,

    // Precedence 5
    /// String concatenation
    Concat,

    // Precedence 6
    /// Addition
    Plus,
    /// Subtraction
    Minus,

    // Precedence 7 (highest for binary)
    /// Multiplication
    Times,
    /// Division
    Divide,
    /// Modulo
    Modulo,
}

impl BinaryOp {
    /// Get the precedence level (1-7, higher binds tighter)
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq => 3,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 4,
            Self::Concat => 5,
            Self::Plus | Self::Minus => 6,
            Self::Times | Self::Divide | Self::Modulo => 7,
        }
    }

    /// Check if this is an arithmetic operator
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Times | Self::Divide | Self::Modulo
        )
    }

    /// Check if this is a comparison operator
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Check if this is a logical operator
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// The catalog name this operator resolves under
    pub const fn fn_name(&self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Eq => "eq",
            Self::NotEq => "neq",
            Self::Lt => "lt",
            Self::LtEq => "lte",
            Self::Gt => "gt",
            Self::GtEq => "gte",
            Self::Concat => "concat",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        };
        write!(f, "{symbol}")
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Unary plus
    Pos,
    /// Unary negation
    Neg,
    /// Logical not
    Not,
}

impl UnaryOp {
    /// Check if this is an arithmetic sign operator
    pub const fn is_sign(&self) -> bool {
        matches!(self, Self::Pos | Self::Neg)
    }

    /// The catalog name this operator resolves under
    pub const fn fn_name(&self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Neg => "neg",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Pos => "+",
            Self::Neg => "-",
            Self::Not => "NOT",
        };
        write!(f, "{symbol}")
    }
}
