//! Function and operator overload resolution
//!
//! Given a call's name and actual argument types, every registered signature
//! with matching arity is checked parameter-by-parameter: identity (the
//! types already match), permitted implicit cast, or rejection. Survivors
//! are ranked by a fixed total order over declared parameter kinds; the
//! first differing parameter position decides. When an argument type is a
//! union spanning several survivors, resolution defers to the runtime value
//! with a `Dynamic` plan. A name with no match is an unmatched result, never
//! a panic: the surrounding pass turns it into a diagnostic.

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::coercion::{can_coerce, is_exact_match};
use crate::type_system::{ScalarType, SingleType, StaticType};

use super::signature::{FnParameter, FnSignature};

/// A resolved call plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FnMatch {
    /// A single statically resolved call
    Static {
        /// The winning signature
        signature: FnSignature,
        /// One entry per parameter; `None` means no cast is needed
        casts: Vec<Option<SingleType>>,
        /// Number of parameters needing no cast
        exact: usize,
    },
    /// Dispatch deferred to the runtime value, candidates in ranked order
    Dynamic {
        /// Ordered candidate signatures
        candidates: Vec<FnSignature>,
    },
}

impl FnMatch {
    /// The static type of the call's result
    pub fn return_type(&self) -> StaticType {
        match self {
            Self::Static { signature, .. } => {
                StaticType::Single(signature.return_type().clone())
            }
            Self::Dynamic { candidates } => {
                StaticType::any_of(candidates.iter().map(|c| c.return_type().clone()))
            }
        }
    }
}

/// The function signature catalog
///
/// Build-once and read-only after construction; safe for unsynchronized
/// concurrent reads across simultaneous compilations.
#[derive(Debug, Default)]
pub struct FnRegistry {
    functions: IndexMap<String, Vec<FnSignature>>,
}

static GLOBAL: LazyLock<FnRegistry> = LazyLock::new(FnRegistry::with_builtins);

impl FnRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global builtin registry
    pub fn global() -> &'static FnRegistry {
        &GLOBAL
    }

    /// Register a signature under its function name
    pub fn register(&mut self, signature: FnSignature) {
        self.functions
            .entry(signature.name().to_string())
            .or_default()
            .push(signature);
    }

    /// Get every signature registered under a name
    pub fn signatures(&self, name: &str) -> &[FnSignature] {
        self.functions
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a call against the catalog
    ///
    /// Returns `None` when the name is unknown or no signature survives
    /// parameter matching.
    pub fn resolve(&self, name: &str, args: &[StaticType]) -> Option<FnMatch> {
        let mut survivors: Vec<Candidate<'_>> = self
            .signatures(name)
            .iter()
            .filter(|sig| sig.arity() == args.len())
            .filter_map(|sig| match_candidate(sig, args))
            .collect();

        if survivors.is_empty() {
            return None;
        }

        survivors.sort_by(|a, b| rank_signatures(a.signature, b.signature));

        let union_spanning =
            args.iter().any(is_union_like) && survivors.len() > 1;
        if union_spanning {
            trace!(
                "deferring {name}/{} to runtime over {} candidates",
                args.len(),
                survivors.len()
            );
            return Some(FnMatch::Dynamic {
                candidates: survivors
                    .into_iter()
                    .map(|c| c.signature.clone())
                    .collect(),
            });
        }

        let best = survivors.remove(0);
        trace!("resolved {name}/{} to {}", args.len(), best.signature);
        Some(FnMatch::Static {
            signature: best.signature.clone(),
            casts: best.casts,
            exact: best.exact,
        })
    }

    /// Build the registry with the builtin operator and function signatures
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        const NUMERICS: &[SingleType] = &[
            SingleType::Int2,
            SingleType::Int4,
            SingleType::Int8,
            SingleType::Int,
            SingleType::Float,
            SingleType::Decimal(crate::type_system::DecimalConstraint::Unconstrained),
        ];

        // Arithmetic operators, one overload per numeric type
        for op in ["plus", "minus", "times", "divide", "modulo"] {
            for ty in NUMERICS {
                registry.register(FnSignature::new(
                    op,
                    vec![
                        FnParameter::new("lhs", ty.clone()),
                        FnParameter::new("rhs", ty.clone()),
                    ],
                    ty.clone(),
                ));
            }
        }

        // Unary sign operators
        for op in ["pos", "neg"] {
            for ty in NUMERICS {
                registry.register(FnSignature::new(
                    op,
                    vec![FnParameter::new("operand", ty.clone())],
                    ty.clone(),
                ));
            }
        }

        // Logical operators
        registry.register(FnSignature::new(
            "not",
            vec![FnParameter::new("operand", SingleType::Bool)],
            SingleType::Bool,
        ));
        for op in ["and", "or"] {
            registry.register(FnSignature::new(
                op,
                vec![
                    FnParameter::new("lhs", SingleType::Bool),
                    FnParameter::new("rhs", SingleType::Bool),
                ],
                SingleType::Bool,
            ));
        }

        // Comparison operators accept any comparable pair; comparability is
        // checked by the inference rules, the catalog entry types the result
        for op in ["eq", "neq", "lt", "lte", "gt", "gte"] {
            registry.register(FnSignature::new(
                op,
                vec![
                    FnParameter::new("lhs", SingleType::Any),
                    FnParameter::new("rhs", SingleType::Any),
                ],
                SingleType::Bool,
            ));
        }

        // Concatenation
        registry.register(FnSignature::new(
            "concat",
            vec![
                FnParameter::new("lhs", SingleType::String),
                FnParameter::new("rhs", SingleType::String),
            ],
            SingleType::String,
        ));

        // LIKE; the escape form can produce missing for an invalid escape
        registry.register(FnSignature::new(
            "like",
            vec![
                FnParameter::new("value", SingleType::String),
                FnParameter::new("pattern", SingleType::String),
            ],
            SingleType::Bool,
        ));
        registry.register(
            FnSignature::new(
                "like",
                vec![
                    FnParameter::new("value", SingleType::String),
                    FnParameter::new("pattern", SingleType::String),
                    FnParameter::new("escape", SingleType::String),
                ],
                SingleType::Bool,
            )
            .missable(),
        );

        // Numeric builtins
        for ty in NUMERICS {
            registry.register(FnSignature::new(
                "abs",
                vec![FnParameter::new("value", ty.clone())],
                ty.clone(),
            ));
        }
        registry.register(FnSignature::new(
            "mod",
            vec![
                FnParameter::new("dividend", SingleType::Int8),
                FnParameter::new("divisor", SingleType::Int8),
            ],
            SingleType::Int8,
        ));

        // String builtins
        for name in ["lower", "upper", "trim"] {
            registry.register(FnSignature::new(
                name,
                vec![FnParameter::new("value", SingleType::String)],
                SingleType::String,
            ));
        }
        for name in ["char_length", "character_length", "octet_length"] {
            registry.register(FnSignature::new(
                name,
                vec![FnParameter::new("value", SingleType::String)],
                SingleType::Int,
            ));
        }
        registry.register(FnSignature::new(
            "substring",
            vec![
                FnParameter::new("value", SingleType::String),
                FnParameter::new("start", SingleType::Int8),
            ],
            SingleType::String,
        ));
        registry.register(FnSignature::new(
            "substring",
            vec![
                FnParameter::new("value", SingleType::String),
                FnParameter::new("start", SingleType::Int8),
                FnParameter::new("length", SingleType::Int8),
            ],
            SingleType::String,
        ));
        registry.register(FnSignature::new(
            "position",
            vec![
                FnParameter::new("needle", SingleType::String),
                FnParameter::new("haystack", SingleType::String),
            ],
            SingleType::Int8,
        ));

        // Session clock; not deterministic across calls
        registry.register(
            FnSignature::new("utcnow", vec![], SingleType::Timestamp).non_deterministic(),
        );

        registry
    }
}

struct Candidate<'a> {
    signature: &'a FnSignature,
    casts: Vec<Option<SingleType>>,
    exact: usize,
}

/// Check one signature against the actual argument types
///
/// A candidate survives only if every parameter position maps to identity or
/// a permitted cast. A union argument matches a position when any of its
/// members does.
fn match_candidate<'a>(signature: &'a FnSignature, args: &[StaticType]) -> Option<Candidate<'a>> {
    let mut casts = Vec::with_capacity(args.len());
    let mut exact = 0usize;

    for (arg, param) in args.iter().zip(signature.parameters()) {
        let all_exact = arg.members().all(|m| is_exact_match(m, &param.ty));
        if all_exact {
            casts.push(None);
            exact += 1;
            continue;
        }
        let any_usable = arg
            .members()
            .any(|m| is_exact_match(m, &param.ty) || can_coerce(m, &param.ty));
        if !any_usable {
            return None;
        }
        casts.push(Some(param.ty.clone()));
    }

    Some(Candidate {
        signature,
        casts,
        exact,
    })
}

/// Is this argument a union the runtime value must disambiguate?
fn is_union_like(arg: &StaticType) -> bool {
    match arg {
        StaticType::AnyOf(_) => true,
        StaticType::Single(s) => s.scalar() == ScalarType::Any,
    }
}

/// Fixed total order over declared parameter kinds
///
/// Arity differences are excluded upstream, so ranking only compares
/// parameter positions left to right; the first differing position decides.
const fn parameter_precedence(scalar: ScalarType) -> u8 {
    match scalar {
        ScalarType::Bool => 0,
        ScalarType::Int2 => 1,
        ScalarType::Int4 => 2,
        ScalarType::Int8 => 3,
        ScalarType::Int => 4,
        ScalarType::Decimal => 5,
        ScalarType::Float => 6,
        ScalarType::Char => 7,
        ScalarType::Varchar => 8,
        ScalarType::String => 9,
        ScalarType::Symbol => 10,
        ScalarType::Clob => 11,
        ScalarType::Blob => 12,
        ScalarType::Date => 13,
        ScalarType::Time => 14,
        ScalarType::Timestamp => 15,
        ScalarType::List => 16,
        ScalarType::Bag => 17,
        ScalarType::Sexp => 18,
        ScalarType::Struct => 19,
        ScalarType::Null => 20,
        ScalarType::Missing => 21,
        ScalarType::Any => 22,
    }
}

fn rank_signatures(a: &FnSignature, b: &FnSignature) -> Ordering {
    for (pa, pb) in a.parameters().iter().zip(b.parameters()) {
        let ordering = parameter_precedence(pa.ty.scalar())
            .cmp(&parameter_precedence(pb.ty.scalar()));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    // Identical parameter kinds cannot occur for distinct overloads of one
    // name; fall back to the identity key so the order is still total
    a.specific_name().cmp(b.specific_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_match_wins() {
        let registry = FnRegistry::global();
        let Some(FnMatch::Static {
            signature,
            casts,
            exact,
        }) = registry.resolve("abs", &[StaticType::INT4])
        else {
            panic!("expected static match");
        };
        assert_eq!(signature.specific_name(), "abs__int4__int4");
        assert_eq!(casts, vec![None]);
        assert_eq!(exact, 1);
    }

    #[test]
    fn test_cast_plan_and_exact_count() {
        let registry = FnRegistry::global();
        let Some(FnMatch::Static {
            signature,
            casts,
            exact,
        }) = registry.resolve("plus", &[StaticType::INT2, StaticType::INT8])
        else {
            panic!("expected static match");
        };
        // INT2 widens to INT8; the INT8 argument is exact
        assert_eq!(signature.specific_name(), "plus__int8_int8__int8");
        assert_eq!(casts, vec![Some(SingleType::Int8), None]);
        assert_eq!(exact, 1);
    }

    #[test]
    fn test_ranking_prefers_lower_parameter_precedence() {
        let registry = FnRegistry::global();
        // Every numeric overload of abs survives an INT2 argument; the INT2
        // overload ranks first
        let Some(FnMatch::Static { signature, .. }) =
            registry.resolve("abs", &[StaticType::INT2])
        else {
            panic!("expected static match");
        };
        assert_eq!(signature.specific_name(), "abs__int2__int2");
    }

    #[test]
    fn test_union_argument_defers_to_runtime() {
        let registry = FnRegistry::global();
        let arg = StaticType::any_of([SingleType::Int2, SingleType::Float]);
        let Some(FnMatch::Dynamic { candidates }) = registry.resolve("abs", &[arg]) else {
            panic!("expected dynamic match");
        };
        // Ranked order: integer widths ascending, then decimal, then float
        let names: Vec<_> = candidates.iter().map(FnSignature::specific_name).collect();
        assert_eq!(
            names,
            vec![
                "abs__int2__int2",
                "abs__int4__int4",
                "abs__int8__int8",
                "abs__int__int",
                "abs__decimal__decimal",
                "abs__float__float",
            ]
        );
    }

    #[test]
    fn test_union_argument_with_single_survivor_is_static() {
        let registry = FnRegistry::global();
        let arg = StaticType::any_of([SingleType::String, SingleType::Int]);
        let result = registry.resolve("lower", &[arg]);
        assert!(matches!(result, Some(FnMatch::Static { .. })));
    }

    #[test]
    fn test_dynamic_return_type_is_union_of_candidates() {
        let registry = FnRegistry::global();
        let arg = StaticType::any_of([SingleType::Int2, SingleType::Float]);
        let matched = registry.resolve("abs", &[arg]).expect("resolves");
        let ty = matched.return_type();
        assert!(matches!(ty, StaticType::AnyOf(_)));
    }

    #[test]
    fn test_unknown_name_and_unmatched_arguments_return_none() {
        let registry = FnRegistry::global();
        assert_eq!(registry.resolve("frobnicate", &[]), None);
        assert_eq!(registry.resolve("abs", &[StaticType::STRING]), None);
        // Arity mismatch is excluded upstream of ranking
        assert_eq!(
            registry.resolve("abs", &[StaticType::INT, StaticType::INT]),
            None
        );
    }

    #[test]
    fn test_null_argument_coerces_to_any_parameter() {
        let registry = FnRegistry::global();
        let result = registry.resolve("lower", &[StaticType::NULL]);
        assert!(matches!(result, Some(FnMatch::Static { .. })));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let registry = FnRegistry::global();
        let args = [StaticType::any_of([SingleType::Int2, SingleType::Float])];
        assert_eq!(
            registry.resolve("abs", &args),
            registry.resolve("abs", &args)
        );
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = FnRegistry::global();
        assert!(registry.resolve("ABS", &[StaticType::INT]).is_some());
        assert!(registry.resolve("Char_Length", &[StaticType::STRING]).is_some());
    }
}
