//! Semantic analysis pass
//!
//! Walks a parsed expression bottom-up and produces a `TypedExpr` tree:
//! every node is annotated with a final static type, every call node with a
//! resolved call plan. Type mismatches become structured diagnostics rather
//! than hard failures, with the dynamic type as the recovery annotation, so
//! a single pass reports every problem in the expression.

use log::debug;
use serde::{Deserialize, Serialize};

use amberql_ast::{
    BinaryOp, CallExpr, CastExpr, Expr, ExcludePath, IsExpr, LikeExpr, Literal, Spanned,
    TypeReference, UnaryOp,
};
use amberql_diagnostics::{
    Diagnostic, Span, AQ0100, AQ0101, AQ0102, AQ0103, AQ0104, AQ0105, AQ0106, AQ0107,
};

use crate::catalog::{TypeCatalog, TypeDeclarationError};
use crate::inference::{
    infer_arithmetic, infer_comparison, infer_concat, infer_like, infer_logical, infer_not,
    infer_sign, TypeInferenceResult,
};
use crate::type_system::{SingleType, StaticType};

use super::exclude::{compile_exclude_paths, CompiledExcludeItem};
use super::resolver::{FnMatch, FnRegistry};

/// Scoped variable typing environment
#[derive(Debug, Clone, Default)]
pub struct TypeEnvironment {
    symbols: indexmap::IndexMap<String, StaticType>,
    parent: Option<Box<TypeEnvironment>>,
}

impl TypeEnvironment {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child environment
    pub fn child(&self) -> Self {
        Self {
            symbols: indexmap::IndexMap::new(),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Bind a variable to a type
    pub fn define(&mut self, name: impl Into<String>, ty: StaticType) {
        self.symbols.insert(name.into(), ty);
    }

    /// Look up a variable
    pub fn lookup(&self, name: &str) -> Option<&StaticType> {
        self.symbols
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }
}

/// Whether a node's typing holds for every runtime value or needs a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Certainty {
    /// Valid for every runtime value of the operand types
    Certain,
    /// Valid only for some runtime values; the evaluator inserts a check
    Uncertain,
}

/// An expression node annotated with its final type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedExpr {
    /// The annotated node
    pub kind: TypedExprKind,
    /// Final static type of this node
    pub ty: StaticType,
    /// Whether the typing is deferred to a runtime check
    pub certainty: Certainty,
    /// Source span
    pub span: Span,
}

/// Annotated expression node kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedExprKind {
    /// Literal value
    Literal(Literal),
    /// Variable reference
    VarRef(String),
    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    /// Unary operation
    Unary { op: UnaryOp, operand: Box<TypedExpr> },
    /// LIKE pattern match
    Like {
        value: Box<TypedExpr>,
        pattern: Box<TypedExpr>,
        escape: Option<Box<TypedExpr>>,
    },
    /// Function call with its resolved plan; `None` when resolution failed
    /// and a diagnostic was reported
    Call {
        name: String,
        args: Vec<TypedExpr>,
        plan: Option<FnMatch>,
    },
    /// Type cast
    Cast {
        expr: Box<TypedExpr>,
        target: SingleType,
    },
    /// Type test
    Is {
        expr: Box<TypedExpr>,
        target: SingleType,
    },
}

/// The semantic analyzer
///
/// Owns the per-compilation state: the variable environment and the
/// accumulated diagnostics. The signature catalog and type catalog are
/// shared, read-only tables.
pub struct SemanticAnalyzer<'a> {
    env: TypeEnvironment,
    registry: &'a FnRegistry,
    catalog: &'a TypeCatalog,
    diagnostics: Vec<Diagnostic>,
}

impl Default for SemanticAnalyzer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SemanticAnalyzer<'a> {
    /// Create an analyzer over the global catalogs
    pub fn new() -> Self {
        Self {
            env: TypeEnvironment::new(),
            registry: FnRegistry::global(),
            catalog: TypeCatalog::global(),
            diagnostics: Vec::new(),
        }
    }

    /// Create an analyzer over a custom signature registry
    pub fn with_registry(registry: &'a FnRegistry) -> Self {
        Self {
            env: TypeEnvironment::new(),
            registry,
            catalog: TypeCatalog::global(),
            diagnostics: Vec::new(),
        }
    }

    /// Bind a variable in the analyzer's environment
    pub fn define(&mut self, name: impl Into<String>, ty: StaticType) {
        self.env.define(name, ty);
    }

    /// Get the diagnostics accumulated so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the analyzer, returning its diagnostics
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Analyze an expression, annotating every node
    pub fn analyze(&mut self, expr: &Spanned<Expr>) -> TypedExpr {
        let span = expr.span;
        match &expr.inner {
            Expr::Literal(literal) => TypedExpr {
                ty: literal_type(literal),
                certainty: Certainty::Certain,
                kind: TypedExprKind::Literal(literal.clone()),
                span,
            },

            Expr::VarRef(identifier) => {
                let ty = match self.env.lookup(&identifier.name) {
                    Some(ty) => ty.clone(),
                    None => {
                        self.diagnostics.push(Diagnostic::error(
                            AQ0100,
                            format!("undefined variable '{}'", identifier.name),
                        ));
                        StaticType::ANY
                    }
                };
                TypedExpr {
                    ty,
                    certainty: Certainty::Certain,
                    kind: TypedExprKind::VarRef(identifier.name.clone()),
                    span,
                }
            }

            Expr::Binary(binary) => self.analyze_binary(binary, span),
            Expr::Unary(unary) => self.analyze_unary(unary, span),
            Expr::Like(like) => self.analyze_like(like, span),
            Expr::Call(call) => self.analyze_call(call, span),
            Expr::Cast(cast) => self.analyze_cast(cast, span),
            Expr::Is(is) => self.analyze_is(is, span),
        }
    }

    /// Compile the EXCLUDE clause of a select into reduced forests
    pub fn compile_excludes(&mut self, paths: &[ExcludePath]) -> Vec<CompiledExcludeItem> {
        debug!("compiling {} exclude paths", paths.len());
        compile_exclude_paths(paths)
    }

    /// Resolve a source type reference, reporting malformed declarations
    ///
    /// A bad declaration is a semantic error in its own right, independent of
    /// any operand; the dynamic type is the recovery annotation.
    pub fn resolve_type_reference(&mut self, reference: &Spanned<TypeReference>) -> SingleType {
        match self.catalog.instantiate(&reference.inner) {
            Ok(ty) => ty,
            Err(error) => {
                let code = match &error {
                    TypeDeclarationError::UnknownType { .. } => AQ0102,
                    TypeDeclarationError::WrongParameterCount { .. } => AQ0103,
                    TypeDeclarationError::InvalidScale { .. }
                    | TypeDeclarationError::InvalidParameter { .. } => AQ0104,
                };
                self.diagnostics
                    .push(Diagnostic::error(code, error.to_string()));
                SingleType::Any
            }
        }
    }

    fn analyze_binary(&mut self, binary: &amberql_ast::BinaryExpr, span: Span) -> TypedExpr {
        let left = self.analyze(&binary.left);
        let right = self.analyze(&binary.right);

        let result = if binary.op.is_arithmetic() {
            infer_arithmetic(&left.ty, &right.ty)
        } else if binary.op == BinaryOp::Concat {
            infer_concat(&left.ty, &right.ty)
        } else if binary.op.is_comparison() {
            infer_comparison(&left.ty, &right.ty)
        } else {
            infer_logical(&left.ty, &right.ty)
        };

        let code = if binary.op.is_comparison() { AQ0107 } else { AQ0105 };
        let (ty, certainty) = self.apply_inference(result, || {
            format!(
                "operator '{}' cannot be applied to {} and {}",
                binary.op, left.ty, right.ty
            )
        }, code);

        TypedExpr {
            ty,
            certainty,
            kind: TypedExprKind::Binary {
                op: binary.op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        }
    }

    fn analyze_unary(&mut self, unary: &amberql_ast::UnaryExpr, span: Span) -> TypedExpr {
        let operand = self.analyze(&unary.operand);

        let result = match unary.op {
            UnaryOp::Pos | UnaryOp::Neg => infer_sign(&operand.ty),
            UnaryOp::Not => infer_not(&operand.ty),
        };

        let (ty, certainty) = self.apply_inference(result, || {
            format!(
                "operator '{}' cannot be applied to {}",
                unary.op, operand.ty
            )
        }, AQ0105);

        TypedExpr {
            ty,
            certainty,
            kind: TypedExprKind::Unary {
                op: unary.op,
                operand: Box::new(operand),
            },
            span,
        }
    }

    fn analyze_like(&mut self, like: &LikeExpr, span: Span) -> TypedExpr {
        let value = self.analyze(&like.value);
        let pattern = self.analyze(&like.pattern);
        let escape = like.escape.as_ref().map(|e| self.analyze(e));

        let result = infer_like(&value.ty, &pattern.ty, escape.as_ref().map(|e| &e.ty));
        let (ty, certainty) = self.apply_inference(result, || {
            format!(
                "LIKE cannot be applied to {} and {}",
                value.ty, pattern.ty
            )
        }, AQ0105);

        TypedExpr {
            ty,
            certainty,
            kind: TypedExprKind::Like {
                value: Box::new(value),
                pattern: Box::new(pattern),
                escape: escape.map(Box::new),
            },
            span,
        }
    }

    fn analyze_call(&mut self, call: &CallExpr, span: Span) -> TypedExpr {
        let args: Vec<TypedExpr> = call.args.iter().map(|a| self.analyze(a)).collect();
        let arg_types: Vec<StaticType> = args.iter().map(|a| a.ty.clone()).collect();

        let plan = self.registry.resolve(&call.name.name, &arg_types);
        let ty = match &plan {
            Some(matched) => matched.return_type(),
            None => {
                if self.registry.signatures(&call.name.name).is_empty() {
                    self.diagnostics.push(Diagnostic::error(
                        AQ0101,
                        format!("undefined function '{}'", call.name.name),
                    ));
                } else {
                    let rendered = arg_types
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.diagnostics.push(Diagnostic::error(
                        AQ0106,
                        format!(
                            "no overload of '{}' accepts ({rendered})",
                            call.name.name
                        ),
                    ));
                }
                StaticType::ANY
            }
        };

        TypedExpr {
            ty,
            certainty: Certainty::Certain,
            kind: TypedExprKind::Call {
                name: call.name.name.clone(),
                args,
                plan,
            },
            span,
        }
    }

    fn analyze_cast(&mut self, cast: &CastExpr, span: Span) -> TypedExpr {
        let expr = self.analyze(&cast.expr);
        let target = self.resolve_type_reference(&cast.target);
        TypedExpr {
            ty: StaticType::Single(target.clone()),
            certainty: Certainty::Certain,
            kind: TypedExprKind::Cast {
                expr: Box::new(expr),
                target,
            },
            span,
        }
    }

    fn analyze_is(&mut self, is: &IsExpr, span: Span) -> TypedExpr {
        let expr = self.analyze(&is.expr);
        let target = self.resolve_type_reference(&is.target);
        TypedExpr {
            ty: StaticType::BOOL,
            certainty: Certainty::Certain,
            kind: TypedExprKind::Is {
                expr: Box::new(expr),
                target,
            },
            span,
        }
    }

    /// Turn an inference result into an annotation, reporting failures
    fn apply_inference(
        &mut self,
        result: TypeInferenceResult,
        message: impl FnOnce() -> String,
        code: amberql_diagnostics::ErrorCode,
    ) -> (StaticType, Certainty) {
        match result {
            TypeInferenceResult::Successful(ty) => (ty, Certainty::Certain),
            TypeInferenceResult::Uncertain(ty) => (ty, Certainty::Uncertain),
            TypeInferenceResult::Failed => {
                self.diagnostics.push(Diagnostic::error(code, message()));
                (StaticType::ANY, Certainty::Certain)
            }
        }
    }
}

fn literal_type(literal: &Literal) -> StaticType {
    match literal {
        Literal::Null => StaticType::NULL,
        Literal::Missing => StaticType::MISSING,
        Literal::Boolean(_) => StaticType::BOOL,
        Literal::Integer(_) => StaticType::INT,
        Literal::Decimal(_) => StaticType::DECIMAL,
        Literal::Float(_) => StaticType::FLOAT,
        Literal::String(_) => StaticType::STRING,
        Literal::Symbol(_) => StaticType::SYMBOL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amberql_ast::{BinaryExpr, Identifier, UnaryExpr};

    fn spanned(expr: Expr) -> Spanned<Expr> {
        Spanned::new(expr, Span::default())
    }

    fn lit(literal: Literal) -> Spanned<Expr> {
        spanned(Expr::Literal(literal))
    }

    fn binary(op: BinaryOp, left: Spanned<Expr>, right: Spanned<Expr>) -> Spanned<Expr> {
        spanned(Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    #[test]
    fn test_literal_annotation() {
        let mut analyzer = SemanticAnalyzer::new();
        let typed = analyzer.analyze(&lit(Literal::Integer(3)));
        assert_eq!(typed.ty, StaticType::INT);
        assert!(analyzer.diagnostics().is_empty());
    }

    #[test]
    fn test_arithmetic_annotation() {
        let mut analyzer = SemanticAnalyzer::new();
        let expr = binary(
            BinaryOp::Plus,
            lit(Literal::Integer(1)),
            lit(Literal::Integer(2)),
        );
        let typed = analyzer.analyze(&expr);
        assert_eq!(typed.ty, StaticType::INT);
        assert_eq!(typed.certainty, Certainty::Certain);
    }

    #[test]
    fn test_type_mismatch_reports_and_recovers() {
        let mut analyzer = SemanticAnalyzer::new();
        let expr = binary(
            BinaryOp::Plus,
            lit(Literal::Integer(1)),
            lit(Literal::String("x".into())),
        );
        let typed = analyzer.analyze(&expr);
        assert_eq!(typed.ty, StaticType::ANY);
        assert_eq!(analyzer.diagnostics().len(), 1);
        assert_eq!(analyzer.diagnostics()[0].code, AQ0105);
    }

    #[test]
    fn test_variable_lookup_and_undefined_variable() {
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.define("x", StaticType::INT4);

        let known = spanned(Expr::VarRef(Identifier::new("x")));
        assert_eq!(analyzer.analyze(&known).ty, StaticType::INT4);

        let unknown = spanned(Expr::VarRef(Identifier::new("y")));
        assert_eq!(analyzer.analyze(&unknown).ty, StaticType::ANY);
        assert_eq!(analyzer.diagnostics()[0].code, AQ0100);
    }

    #[test]
    fn test_call_annotation_carries_plan() {
        let mut analyzer = SemanticAnalyzer::new();
        let expr = spanned(Expr::Call(CallExpr {
            name: Identifier::new("abs"),
            args: vec![lit(Literal::Integer(-3))],
        }));
        let typed = analyzer.analyze(&expr);
        assert_eq!(typed.ty, StaticType::INT);
        let TypedExprKind::Call { plan: Some(FnMatch::Static { exact, .. }), .. } = typed.kind
        else {
            panic!("expected a static plan");
        };
        assert_eq!(exact, 1);
    }

    #[test]
    fn test_undefined_function_and_bad_overload() {
        let mut analyzer = SemanticAnalyzer::new();

        let unknown = spanned(Expr::Call(CallExpr {
            name: Identifier::new("frobnicate"),
            args: vec![],
        }));
        analyzer.analyze(&unknown);
        assert_eq!(analyzer.diagnostics()[0].code, AQ0101);

        let bad_args = spanned(Expr::Call(CallExpr {
            name: Identifier::new("abs"),
            args: vec![lit(Literal::String("x".into()))],
        }));
        analyzer.analyze(&bad_args);
        assert_eq!(analyzer.diagnostics()[1].code, AQ0106);
    }

    #[test]
    fn test_uncertain_like_annotation() {
        let mut analyzer = SemanticAnalyzer::new();
        let expr = spanned(Expr::Like(LikeExpr {
            value: Box::new(lit(Literal::String("abc".into()))),
            pattern: Box::new(lit(Literal::String("a%".into()))),
            escape: Some(Box::new(lit(Literal::String("\\".into())))),
        }));
        let typed = analyzer.analyze(&expr);
        assert_eq!(typed.ty, StaticType::BOOL);
        assert_eq!(typed.certainty, Certainty::Uncertain);
    }

    #[test]
    fn test_not_requires_bool_operand() {
        let mut analyzer = SemanticAnalyzer::new();
        let expr = spanned(Expr::Unary(UnaryExpr {
            op: UnaryOp::Not,
            operand: Box::new(lit(Literal::Boolean(true))),
        }));
        assert_eq!(analyzer.analyze(&expr).ty, StaticType::BOOL);
    }

    #[test]
    fn test_cast_annotation_validates_target() {
        let mut analyzer = SemanticAnalyzer::new();
        let good = spanned(Expr::Cast(CastExpr {
            expr: Box::new(lit(Literal::Integer(1))),
            target: Spanned::new(
                TypeReference::with_parameters("decimal", smallvec::smallvec![10u32, 2u32]),
                Span::default(),
            ),
        }));
        let typed = analyzer.analyze(&good);
        assert_eq!(
            typed.ty,
            StaticType::Single(SingleType::decimal_ps(10, 2))
        );

        let bad = spanned(Expr::Cast(CastExpr {
            expr: Box::new(lit(Literal::Integer(1))),
            target: Spanned::new(
                TypeReference::with_parameters("decimal", smallvec::smallvec![2u32, 4u32]),
                Span::default(),
            ),
        }));
        let typed = analyzer.analyze(&bad);
        assert_eq!(typed.ty, StaticType::ANY);
        assert_eq!(analyzer.diagnostics()[0].code, AQ0104);
    }
}
