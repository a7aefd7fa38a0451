//! Operator type-inference rules
//!
//! Each operator is a pure function from operand types to a tri-state
//! result:
//! - `Successful(type)`: the operation is valid for every runtime value of
//!   the operand types
//! - `Failed`: the operation is invalid for every runtime value
//! - `Uncertain(type)`: the operation is valid only for some runtime values,
//!   so a runtime check is required
//!
//! Any-of operands are checked member-by-member: if every combination fails
//! the result is `Failed`, if every combination succeeds the result is
//! `Successful` over the union of result shapes, and a mix yields
//! `Uncertain`. The dynamic type behaves as the union of one representative
//! shape per runtime kind.

use serde::{Deserialize, Serialize};

use crate::type_system::{DecimalConstraint, ScalarType, SingleType, StaticType, StructType};

/// Tri-state outcome of typing an operator application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeInferenceResult {
    /// Valid for every runtime value of the operand types
    Successful(StaticType),
    /// Invalid for every runtime value
    Failed,
    /// Valid only for some runtime values; requires a runtime check
    Uncertain(StaticType),
}

impl TypeInferenceResult {
    /// Check if the result is `Successful`
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Successful(_))
    }

    /// Check if the result is `Failed`
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if the result is `Uncertain`
    pub fn is_uncertain(&self) -> bool {
        matches!(self, Self::Uncertain(_))
    }

    /// Get the inferred type, if any
    pub fn ty(&self) -> Option<&StaticType> {
        match self {
            Self::Successful(t) | Self::Uncertain(t) => Some(t),
            Self::Failed => None,
        }
    }
}

/// Infer the result type of an arithmetic operator (+, -, *, /, %)
///
/// Both operands must be numeric. If either operand is DECIMAL the result is
/// unconstrained DECIMAL (precise precision/scale arithmetic is a documented
/// approximation). Otherwise the higher operand in the fixed numeric order
/// wins and its exact compile-time type propagates.
pub fn infer_arithmetic(lhs: &StaticType, rhs: &StaticType) -> TypeInferenceResult {
    lift_binary(lhs, rhs, arithmetic_single)
}

/// Infer the result type of the concatenation operator (||)
pub fn infer_concat(lhs: &StaticType, rhs: &StaticType) -> TypeInferenceResult {
    lift_binary(lhs, rhs, concat_single)
}

/// Infer the result type of unary plus/minus
pub fn infer_sign(operand: &StaticType) -> TypeInferenceResult {
    lift_unary(operand, |single| {
        if single.is_numeric() {
            TypeInferenceResult::Successful(StaticType::Single(single.clone()))
        } else {
            TypeInferenceResult::Failed
        }
    })
}

/// Infer the result type of logical NOT
pub fn infer_not(operand: &StaticType) -> TypeInferenceResult {
    lift_unary(operand, |single| bool_only(std::slice::from_ref(single)))
}

/// Infer the result type of logical AND/OR
pub fn infer_logical(lhs: &StaticType, rhs: &StaticType) -> TypeInferenceResult {
    lift_binary(lhs, rhs, |l, r| bool_only(&[l.clone(), r.clone()]))
}

/// Infer the result type of a comparison operator (=, <>, <, <=, >, >=)
///
/// Comparability is decided over the whole static types (null/missing-only
/// types compare to anything, any-of lifts pairwise), so no member expansion
/// is needed here.
pub fn infer_comparison(lhs: &StaticType, rhs: &StaticType) -> TypeInferenceResult {
    if lhs.is_comparable_to(rhs) {
        TypeInferenceResult::Successful(StaticType::BOOL)
    } else {
        TypeInferenceResult::Failed
    }
}

/// Infer the result type of LIKE
///
/// Value and pattern must both be text. With no escape operand the result is
/// a deterministic BOOL. A text-typed escape operand yields `Uncertain(BOOL)`
/// because a multi-codepoint or otherwise invalid escape value can only be
/// detected from the runtime value; a non-text escape type fails outright.
pub fn infer_like(
    value: &StaticType,
    pattern: &StaticType,
    escape: Option<&StaticType>,
) -> TypeInferenceResult {
    match escape {
        None => lift_binary(value, pattern, |v, p| {
            if v.is_text() && p.is_text() {
                TypeInferenceResult::Successful(StaticType::BOOL)
            } else {
                TypeInferenceResult::Failed
            }
        }),
        Some(escape) => {
            let mut results = Vec::new();
            for v in expansion(value) {
                for p in expansion(pattern) {
                    for e in expansion(escape) {
                        results.push(if v.is_text() && p.is_text() && e.is_text() {
                            TypeInferenceResult::Uncertain(StaticType::BOOL)
                        } else {
                            TypeInferenceResult::Failed
                        });
                    }
                }
            }
            combine(results)
        }
    }
}

fn arithmetic_single(lhs: &SingleType, rhs: &SingleType) -> TypeInferenceResult {
    if !lhs.is_numeric() || !rhs.is_numeric() {
        return TypeInferenceResult::Failed;
    }
    if lhs.scalar() == ScalarType::Decimal || rhs.scalar() == ScalarType::Decimal {
        return TypeInferenceResult::Successful(StaticType::DECIMAL);
    }
    let lhs_precedence = lhs.scalar().numeric_precedence().expect("numeric");
    let rhs_precedence = rhs.scalar().numeric_precedence().expect("numeric");
    let winner = if rhs_precedence > lhs_precedence { rhs } else { lhs };
    TypeInferenceResult::Successful(StaticType::Single(winner.clone()))
}

fn concat_single(lhs: &SingleType, rhs: &SingleType) -> TypeInferenceResult {
    if !lhs.is_text() || !rhs.is_text() {
        return TypeInferenceResult::Failed;
    }
    if lhs.is_unbounded_text() || rhs.is_unbounded_text() {
        return TypeInferenceResult::Successful(StaticType::STRING);
    }
    let length = declared_text_length(lhs) + declared_text_length(rhs);
    let both_char =
        lhs.scalar() == ScalarType::Char && rhs.scalar() == ScalarType::Char;
    let result = if both_char {
        SingleType::char_len(length)
    } else {
        SingleType::varchar_len(length)
    };
    TypeInferenceResult::Successful(StaticType::Single(result))
}

/// Declared length of a bounded text type; CHAR defaults to 1
fn declared_text_length(ty: &SingleType) -> u32 {
    match ty {
        SingleType::Char(length) => length.unwrap_or(1),
        SingleType::Varchar(Some(length)) => *length,
        _ => 0,
    }
}

fn bool_only(operands: &[SingleType]) -> TypeInferenceResult {
    if operands.iter().all(|t| t.scalar() == ScalarType::Bool) {
        TypeInferenceResult::Successful(StaticType::BOOL)
    } else {
        TypeInferenceResult::Failed
    }
}

fn lift_unary(
    operand: &StaticType,
    rule: impl Fn(&SingleType) -> TypeInferenceResult,
) -> TypeInferenceResult {
    combine(expansion(operand).iter().map(rule).collect())
}

fn lift_binary(
    lhs: &StaticType,
    rhs: &StaticType,
    rule: impl Fn(&SingleType, &SingleType) -> TypeInferenceResult,
) -> TypeInferenceResult {
    let mut results = Vec::new();
    for l in expansion(lhs) {
        for r in expansion(rhs) {
            results.push(rule(&l, &r));
        }
    }
    combine(results)
}

/// Member shapes of a type for rule evaluation
///
/// The dynamic type expands to one representative shape per runtime kind so
/// that an operator over a dynamic operand reports which shapes would
/// succeed.
fn expansion(ty: &StaticType) -> Vec<SingleType> {
    let mut members = Vec::new();
    for member in ty.members() {
        if member.scalar() == ScalarType::Any {
            members.extend(any_representatives());
        } else {
            members.push(member.clone());
        }
    }
    members
}

fn any_representatives() -> Vec<SingleType> {
    vec![
        SingleType::Null,
        SingleType::Missing,
        SingleType::Bool,
        SingleType::Int,
        SingleType::Float,
        SingleType::Decimal(DecimalConstraint::Unconstrained),
        SingleType::Symbol,
        SingleType::String,
        SingleType::Clob,
        SingleType::Blob,
        SingleType::Date,
        SingleType::Time,
        SingleType::Timestamp,
        SingleType::List(None),
        SingleType::Bag(None),
        SingleType::Sexp(None),
        SingleType::Struct(StructType::open()),
    ]
}

/// Fold member-combination outcomes into one tri-state result
///
/// All failed -> `Failed`. Any failure or uncertainty among successes ->
/// `Uncertain` over the union of success shapes. Otherwise `Successful`.
fn combine(results: Vec<TypeInferenceResult>) -> TypeInferenceResult {
    let mut shapes: Vec<SingleType> = Vec::new();
    let mut saw_failure = false;
    let mut saw_uncertain = false;

    for result in results {
        match result {
            TypeInferenceResult::Successful(ty) => {
                shapes.extend(ty.members().cloned());
            }
            TypeInferenceResult::Uncertain(ty) => {
                saw_uncertain = true;
                shapes.extend(ty.members().cloned());
            }
            TypeInferenceResult::Failed => saw_failure = true,
        }
    }

    if shapes.is_empty() {
        return TypeInferenceResult::Failed;
    }
    let ty = StaticType::any_of(shapes);
    if saw_failure || saw_uncertain {
        TypeInferenceResult::Uncertain(ty)
    } else {
        TypeInferenceResult::Successful(ty)
    }
}
