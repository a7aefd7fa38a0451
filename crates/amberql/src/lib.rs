//! AmberQL semantic-analysis core
//!
//! This crate is the compile-time heart of the AmberQL query compiler:
//! - Static typing of expressions and operators with tri-state outcomes
//! - Function/operator overload resolution against a typed signature catalog
//! - Compilation of `SELECT * EXCLUDE ...` path lists into reduced forests
//!
//! The parser hands this core typed AST nodes; the evaluator consumes the
//! annotated trees, resolved call plans, and compiled exclusion forests it
//! produces.
//!
//! # Example
//!
//! ```
//! use amberql::ast::{Expr, Literal, Spanned};
//! use amberql::types::semantic::SemanticAnalyzer;
//! use amberql::types::StaticType;
//! use amberql::diagnostics::Span;
//!
//! let mut analyzer = SemanticAnalyzer::new();
//! let expr = Spanned::new(Expr::Literal(Literal::Integer(42)), Span::default());
//! let typed = analyzer.analyze(&expr);
//! assert_eq!(typed.ty, StaticType::INT);
//! ```

// Re-export all public APIs from internal crates
pub use amberql_ast as ast;
pub use amberql_diagnostics as diagnostics;
pub use amberql_types as types;

// Convenience re-exports
pub use amberql_diagnostics::{AmberError, Diagnostic, Result};
pub use amberql_types::{
    CompiledExcludeItem, FnMatch, FnRegistry, FnSignature, SemanticAnalyzer, SingleType,
    StaticType, TypeCatalog, TypeInferenceResult, TypedExpr, Value,
};
