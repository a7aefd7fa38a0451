//! Implicit cast rules
//!
//! This module implements the implicit conversions function resolution is
//! allowed to insert:
//! - Numeric widening along the fixed order INT2 < INT4 < INT8 < INT < FLOAT
//!   < DECIMAL
//! - Bounded-text widening (CHAR -> VARCHAR -> STRING, SYMBOL -> STRING)
//! - Null/missing arguments coerce to any parameter type
//!
//! Explicit CAST legality is wider but is a runtime concern; only the
//! compile-time decision of whether an implicit conversion exists lives here.

use crate::type_system::{ScalarType, SingleType};

/// Check if an implicit conversion from `from` to `to` exists
///
/// Identity (same scalar category) is not a conversion; callers distinguish
/// exact matches from casts.
pub fn can_coerce(from: &SingleType, to: &SingleType) -> bool {
    let (from_scalar, to_scalar) = (from.scalar(), to.scalar());

    if from_scalar == to_scalar {
        return false;
    }

    // Null and missing arguments flow into any parameter; the signature's
    // null-call flags decide what the evaluator does with them.
    if from_scalar.is_unknown() {
        return true;
    }

    // A dynamic argument can carry any runtime value, so every parameter is
    // reachable; resolution defers the final pick to the runtime value.
    if from_scalar == ScalarType::Any {
        return true;
    }

    // Every value flows into a dynamic parameter
    if to_scalar == ScalarType::Any {
        return true;
    }

    if let (Some(from_prec), Some(to_prec)) =
        (from_scalar.numeric_precedence(), to_scalar.numeric_precedence())
    {
        return from_prec < to_prec;
    }

    matches!(
        (from_scalar, to_scalar),
        (ScalarType::Char, ScalarType::Varchar)
            | (ScalarType::Char, ScalarType::String)
            | (ScalarType::Varchar, ScalarType::String)
            | (ScalarType::Symbol, ScalarType::String)
    )
}

/// Check if an argument type satisfies a parameter type exactly
///
/// Exactness is decided at the scalar-category level: a `DECIMAL(10,2)`
/// argument is an exact match for a `DECIMAL` parameter.
pub fn is_exact_match(argument: &SingleType, parameter: &SingleType) -> bool {
    argument.scalar() == parameter.scalar()
}
