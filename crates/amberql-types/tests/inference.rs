//! Operator inference tests
//!
//! Covers the tri-state operator rules over the public API:
//! - Arithmetic promotion and the DECIMAL approximation
//! - Concatenation length arithmetic
//! - LIKE's escape-character uncertainty
//! - Any-of operand lifting

use pretty_assertions::assert_eq;
use rstest::rstest;

use amberql_types::inference::{
    infer_arithmetic, infer_comparison, infer_concat, infer_like, infer_not, infer_sign,
};
use amberql_types::{SingleType, StaticType, TypeInferenceResult};

#[rstest]
#[case(StaticType::INT2, StaticType::INT4, StaticType::INT4)]
#[case(StaticType::INT4, StaticType::INT2, StaticType::INT4)]
#[case(StaticType::INT8, StaticType::INT, StaticType::INT)]
#[case(StaticType::INT, StaticType::FLOAT, StaticType::FLOAT)]
#[case(StaticType::FLOAT, StaticType::DECIMAL, StaticType::DECIMAL)]
fn arithmetic_promotes_to_higher_operand(
    #[case] lhs: StaticType,
    #[case] rhs: StaticType,
    #[case] expected: StaticType,
) {
    assert_eq!(
        infer_arithmetic(&lhs, &rhs),
        TypeInferenceResult::Successful(expected)
    );
}

#[test]
fn arithmetic_is_commutative_in_kind() {
    let pairs = [
        (StaticType::INT2, StaticType::FLOAT),
        (StaticType::INT4, StaticType::INT8),
        (StaticType::INT, StaticType::DECIMAL),
    ];
    for (a, b) in pairs {
        let forward = infer_arithmetic(&a, &b);
        let backward = infer_arithmetic(&b, &a);
        assert_eq!(forward, backward);
    }
}

#[test]
fn constrained_decimal_operand_yields_unconstrained_decimal() {
    let constrained = StaticType::Single(SingleType::decimal_ps(12, 4));
    assert_eq!(
        infer_arithmetic(&constrained, &StaticType::INT2),
        TypeInferenceResult::Successful(StaticType::DECIMAL)
    );
}

#[rstest]
#[case(SingleType::char_len(3), SingleType::char_len(4), SingleType::char_len(7))]
#[case(SingleType::varchar_len(3), SingleType::char_len(4), SingleType::varchar_len(7))]
#[case(SingleType::char_len(4), SingleType::varchar_len(3), SingleType::varchar_len(7))]
#[case(SingleType::varchar_len(2), SingleType::varchar_len(2), SingleType::varchar_len(4))]
fn concat_sums_declared_lengths(
    #[case] lhs: SingleType,
    #[case] rhs: SingleType,
    #[case] expected: SingleType,
) {
    assert_eq!(
        infer_concat(&StaticType::Single(lhs), &StaticType::Single(rhs)),
        TypeInferenceResult::Successful(StaticType::Single(expected))
    );
}

#[test]
fn concat_with_unbounded_operand_is_unbounded_string() {
    let char4 = StaticType::Single(SingleType::char_len(4));
    assert_eq!(
        infer_concat(&StaticType::STRING, &char4),
        TypeInferenceResult::Successful(StaticType::STRING)
    );
    assert_eq!(
        infer_concat(&char4, &StaticType::SYMBOL),
        TypeInferenceResult::Successful(StaticType::STRING)
    );
    // An unbounded VARCHAR behaves like STRING
    let unbounded = StaticType::Single(SingleType::Varchar(None));
    assert_eq!(
        infer_concat(&unbounded, &char4),
        TypeInferenceResult::Successful(StaticType::STRING)
    );
}

#[test]
fn like_is_tri_state() {
    assert_eq!(
        infer_like(&StaticType::STRING, &StaticType::STRING, None),
        TypeInferenceResult::Successful(StaticType::BOOL)
    );
    assert_eq!(
        infer_like(
            &StaticType::STRING,
            &StaticType::STRING,
            Some(&StaticType::STRING)
        ),
        TypeInferenceResult::Uncertain(StaticType::BOOL)
    );
    assert_eq!(
        infer_like(&StaticType::INT, &StaticType::STRING, None),
        TypeInferenceResult::Failed
    );
}

#[test]
fn uncertain_never_downgrades_to_successful() {
    // A union operand that only partially satisfies the rule must stay
    // uncertain even though some members succeed cleanly
    let partly_numeric = StaticType::any_of([SingleType::Int, SingleType::Bool]);
    let result = infer_arithmetic(&partly_numeric, &StaticType::INT);
    assert!(result.is_uncertain());
    assert_eq!(result.ty(), Some(&StaticType::INT));
}

#[test]
fn sign_and_not_preserve_shapes() {
    let decimal = StaticType::Single(SingleType::decimal_ps(6, 2));
    assert_eq!(
        infer_sign(&decimal),
        TypeInferenceResult::Successful(decimal.clone())
    );
    assert_eq!(
        infer_not(&StaticType::BOOL),
        TypeInferenceResult::Successful(StaticType::BOOL)
    );
}

#[test]
fn comparison_covers_kind_classes() {
    assert!(infer_comparison(&StaticType::INT2, &StaticType::DECIMAL).is_successful());
    assert!(infer_comparison(&StaticType::STRING, &StaticType::SYMBOL).is_successful());
    assert!(infer_comparison(&StaticType::NULL, &StaticType::BOOL).is_successful());
    assert!(infer_comparison(&StaticType::BOOL, &StaticType::DECIMAL).is_failed());
}
