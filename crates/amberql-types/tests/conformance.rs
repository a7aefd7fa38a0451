//! Value-conformance tests over the public API
//!
//! Exercises `is_instance` across the parameterized shapes: integer ranges,
//! decimal digit limits, codepoint-counted lengths, collections, and struct
//! shapes with duplicate fields and closed content.

use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;

use amberql_types::{
    SingleType, StaticType, StructField, StructType, StructValue, Value,
};

#[rstest]
#[case(StaticType::INT2, 32_767, true)]
#[case(StaticType::INT2, -32_768, true)]
#[case(StaticType::INT2, 32_768, false)]
#[case(StaticType::INT4, 2_147_483_647, true)]
#[case(StaticType::INT4, 2_147_483_648, false)]
#[case(StaticType::INT8, i64::MAX, true)]
#[case(StaticType::INT, i64::MIN, true)]
fn integer_subtypes_check_value_ranges(
    #[case] ty: StaticType,
    #[case] value: i64,
    #[case] expected: bool,
) {
    assert_eq!(ty.is_instance(&Value::Int(value)), expected);
}

#[rstest]
#[case("12.34", true)]
#[case("12.3400", true)] // trailing zeros stripped before counting
#[case("-12.34", true)]
#[case("123.4", false)] // integer digits exceed precision - scale
#[case("1.234", false)] // scale exceeds declaration
#[case("0.05", true)]
fn decimal_digits_fit_precision_and_scale(#[case] text: &str, #[case] expected: bool) {
    let ty = StaticType::Single(SingleType::decimal_ps(4, 2));
    let value = Value::Decimal(Decimal::from_str(text).unwrap());
    assert_eq!(ty.is_instance(&value), expected);
}

#[test]
fn text_constraints_count_codepoints_not_bytes() {
    let varchar2 = StaticType::Single(SingleType::varchar_len(2));
    // Two codepoints, six bytes
    assert!(varchar2.is_instance(&Value::string("日本")));
    assert!(!varchar2.is_instance(&Value::string("abc")));
}

#[test]
fn collections_check_elements_recursively() {
    let ty = StaticType::Single(SingleType::list_of(StaticType::Single(
        SingleType::list_of(StaticType::INT2),
    )));
    let nested_ok = Value::list([Value::list([Value::Int(1)]), Value::list([])]);
    assert!(ty.is_instance(&nested_ok));

    let nested_bad = Value::list([Value::list([Value::Int(1_000_000)])]);
    assert!(!ty.is_instance(&nested_bad));
}

#[test]
fn empty_collections_satisfy_element_constraints() {
    let bag_of_strings =
        StaticType::Single(SingleType::bag_of(StaticType::STRING));
    assert!(bag_of_strings.is_instance(&Value::bag([])));
}

#[test]
fn struct_shape_with_optional_and_closed_content() {
    let shape = StructType::new([
        StructField::new("id", StaticType::INT),
        StructField::optional("note", StaticType::STRING),
    ])
    .closed();
    let ty = StaticType::Single(SingleType::Struct(shape));

    let minimal = Value::Struct(StructValue::new().with_field("id", Value::Int(7)));
    assert!(ty.is_instance(&minimal));

    let full = Value::Struct(
        StructValue::new()
            .with_field("id", Value::Int(7))
            .with_field("note", Value::string("ok")),
    );
    assert!(ty.is_instance(&full));

    let extra = Value::Struct(
        StructValue::new()
            .with_field("id", Value::Int(7))
            .with_field("other", Value::Bool(true)),
    );
    assert!(!ty.is_instance(&extra));
}

#[test]
fn conformance_is_stable_under_reevaluation() {
    let ty = StaticType::any_of([SingleType::Int2, SingleType::String]);
    let value = Value::string("hello");
    let first = ty.is_instance(&value);
    for _ in 0..8 {
        assert_eq!(ty.is_instance(&value), first);
    }
}
