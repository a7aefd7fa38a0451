//! Expression AST nodes for AmberQL
//!
//! Expression nodes arrive from the parser with spans attached; the semantic
//! core annotates them with static types and resolved call plans.

use crate::{BinaryOp, BoxExpr, Identifier, Literal, Spanned, TypeReference, UnaryOp};

/// All expression types the semantic core consumes
#[derive(Debug, Clone)]
pub enum Expr {
    /// Literal value
    Literal(Literal),
    /// Variable reference
    VarRef(Identifier),
    /// Binary operation
    Binary(BinaryExpr),
    /// Unary operation
    Unary(UnaryExpr),
    /// LIKE pattern match, with optional escape operand
    Like(LikeExpr),
    /// Function call
    Call(CallExpr),
    /// Type cast (CAST(expr AS type))
    Cast(CastExpr),
    /// Type test (expr IS type)
    Is(IsExpr),
}

/// Binary operation expression
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    /// The operator
    pub op: BinaryOp,
    /// Left operand
    pub left: BoxExpr,
    /// Right operand
    pub right: BoxExpr,
}

/// Unary operation expression
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    /// The operator
    pub op: UnaryOp,
    /// The operand
    pub operand: BoxExpr,
}

/// LIKE pattern match expression
#[derive(Debug, Clone)]
pub struct LikeExpr {
    /// Value being matched
    pub value: BoxExpr,
    /// Pattern operand
    pub pattern: BoxExpr,
    /// Optional escape-character operand
    pub escape: Option<BoxExpr>,
}

/// Function call expression
#[derive(Debug, Clone)]
pub struct CallExpr {
    /// Function name
    pub name: Identifier,
    /// Ordered arguments
    pub args: Vec<Spanned<Expr>>,
}

/// Type cast expression
#[derive(Debug, Clone)]
pub struct CastExpr {
    /// Expression being cast
    pub expr: BoxExpr,
    /// Target type as written in source
    pub target: Spanned<TypeReference>,
}

/// Type test expression
#[derive(Debug, Clone)]
pub struct IsExpr {
    /// Expression being tested
    pub expr: BoxExpr,
    /// Tested type as written in source
    pub target: Spanned<TypeReference>,
}

impl Expr {
    /// Wrap in a spanned box
    pub fn boxed(self, span: amberql_diagnostics::Span) -> BoxExpr {
        Box::new(Spanned::new(self, span))
    }
}
