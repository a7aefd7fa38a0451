//! Value-conformance checking
//!
//! `is_instance(value, type)` decides whether a runtime value is an instance
//! of a static type, including declared parameters: integer subtypes check
//! their value range, DECIMAL checks digits against precision/scale, text
//! types count codepoints against declared lengths, collections check element
//! types recursively, and structs check declared fields against a name
//! multimap built from the runtime entries.

use rust_decimal::Decimal;

use crate::type_system::{SingleType, StaticType, StructType, ValueKind};
use crate::value::Value;

impl StaticType {
    /// Check whether a runtime value is an instance of this type
    ///
    /// Pure function of the value and the type; an any-of matches when any
    /// member matches.
    pub fn is_instance(&self, value: &Value) -> bool {
        self.members().any(|member| member.is_instance(value))
    }
}

impl SingleType {
    /// Check whether a runtime value is an instance of this shape
    pub fn is_instance(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Null => value.kind() == ValueKind::Null,
            Self::Missing => value.kind() == ValueKind::Missing,
            Self::Bool => value.kind() == ValueKind::Bool,
            Self::Int2 => int_in_range(value, i64::from(i16::MIN), i64::from(i16::MAX)),
            Self::Int4 => int_in_range(value, i64::from(i32::MIN), i64::from(i32::MAX)),
            Self::Int8 | Self::Int => value.kind() == ValueKind::Int,
            Self::Float => value.kind() == ValueKind::Float,
            Self::Decimal(constraint) => match value {
                Value::Decimal(d) => constraint_admits_decimal(constraint, d),
                _ => false,
            },
            // CHAR without an explicit length is CHAR(1) per SQL
            Self::Char(length) => text_length_eq(value, length.unwrap_or(1)),
            Self::Varchar(None) | Self::String => value.kind() == ValueKind::String,
            Self::Varchar(Some(length)) => text_length_up_to(value, *length),
            Self::Symbol => value.kind() == ValueKind::Symbol,
            Self::Clob => value.kind() == ValueKind::Clob,
            Self::Blob => value.kind() == ValueKind::Blob,
            Self::Date => value.kind() == ValueKind::Date,
            Self::Time => value.kind() == ValueKind::Time,
            Self::Timestamp => value.kind() == ValueKind::Timestamp,
            Self::List(element) => sequence_conforms(value, ValueKind::List, element.as_deref()),
            Self::Bag(element) => sequence_conforms(value, ValueKind::Bag, element.as_deref()),
            Self::Sexp(element) => sequence_conforms(value, ValueKind::Sexp, element.as_deref()),
            Self::Struct(shape) => match value {
                Value::Struct(s) => struct_conforms(shape, s),
                _ => false,
            },
        }
    }
}

fn int_in_range(value: &Value, min: i64, max: i64) -> bool {
    match value {
        Value::Int(i) => (min..=max).contains(i),
        _ => false,
    }
}

/// Check a decimal value against a declared precision/scale
///
/// The digit count is taken after stripping trailing zeros, so `1.200`
/// conforms to DECIMAL(2,1).
fn constraint_admits_decimal(
    constraint: &crate::type_system::DecimalConstraint,
    value: &Decimal,
) -> bool {
    use crate::type_system::DecimalConstraint;

    match constraint {
        DecimalConstraint::Unconstrained => true,
        DecimalConstraint::PrecisionScale { precision, scale } => {
            let normalized = value.normalize();
            if normalized.scale() > *scale {
                return false;
            }
            let integer_digits = decimal_integer_digits(&normalized);
            integer_digits <= precision.saturating_sub(*scale)
        }
    }
}

/// Number of digits before the decimal point, zero for values below one
fn decimal_integer_digits(value: &Decimal) -> u32 {
    let mantissa = value.mantissa().unsigned_abs();
    if mantissa == 0 {
        return 0;
    }
    let total_digits = mantissa.ilog10() + 1;
    total_digits.saturating_sub(value.scale())
}

/// Codepoint count, not byte length
fn text_length_eq(value: &Value, length: u32) -> bool {
    match value {
        Value::String(s) => s.chars().count() == length as usize,
        _ => false,
    }
}

fn text_length_up_to(value: &Value, length: u32) -> bool {
    match value {
        Value::String(s) => s.chars().count() <= length as usize,
        _ => false,
    }
}

/// Element constraints hold vacuously for empty collections, so callers can
/// assert element types without excluding empty containers.
fn sequence_conforms(value: &Value, kind: ValueKind, element: Option<&StaticType>) -> bool {
    if value.kind() != kind {
        return false;
    }
    let Some(elements) = value.as_sequence() else {
        return false;
    };
    match element {
        Some(element_type) => elements.iter().all(|e| element_type.is_instance(e)),
        None => true,
    }
}

fn struct_conforms(shape: &StructType, value: &crate::value::StructValue) -> bool {
    // Build a name -> occurrences multimap; duplicate field names are legal
    // and every occurrence must conform. A non-text key fails immediately.
    let mut occurrences: indexmap::IndexMap<&str, Vec<&Value>> = indexmap::IndexMap::new();
    for (key, field_value) in &value.entries {
        let Some(name) = key.as_text() else {
            return false;
        };
        occurrences.entry(name).or_default().push(field_value);
    }

    for field in &shape.fields {
        match occurrences.get(field.name.as_str()) {
            Some(values) => {
                if !values.iter().all(|v| field.ty.is_instance(v)) {
                    return false;
                }
            }
            None => {
                if !field.optional {
                    return false;
                }
            }
        }
    }

    if shape.content_closed {
        let declared: Vec<&str> = shape.fields.iter().map(|f| f.name.as_str()).collect();
        if occurrences.keys().any(|name| !declared.contains(name)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_system::{StructField, StructType};
    use crate::value::StructValue;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_is_instance_is_pure() {
        let ty = StaticType::INT2;
        let value = Value::Int(100);
        assert_eq!(ty.is_instance(&value), ty.is_instance(&value));
    }

    #[test]
    fn test_integer_subtype_ranges() {
        assert!(StaticType::INT2.is_instance(&Value::Int(32767)));
        assert!(!StaticType::INT2.is_instance(&Value::Int(32768)));
        assert!(StaticType::INT4.is_instance(&Value::Int(70_000)));
        assert!(!StaticType::INT4.is_instance(&Value::Int(3_000_000_000)));
        assert!(StaticType::INT8.is_instance(&Value::Int(3_000_000_000)));
        assert!(!StaticType::INT.is_instance(&Value::Decimal(Decimal::ONE)));
    }

    #[test]
    fn test_decimal_precision_scale() {
        let ty = StaticType::Single(SingleType::decimal_ps(4, 2));
        assert!(ty.is_instance(&Value::Decimal(Decimal::from_str("12.34").unwrap())));
        // Trailing zeros are stripped before counting digits
        assert!(ty.is_instance(&Value::Decimal(Decimal::from_str("12.3400").unwrap())));
        // Too many integer digits
        assert!(!ty.is_instance(&Value::Decimal(Decimal::from_str("123.4").unwrap())));
        // Scale exceeds declaration
        assert!(!ty.is_instance(&Value::Decimal(Decimal::from_str("1.234").unwrap())));
        // Unconstrained admits anything decimal
        let wide = Decimal::from_str("79000000000000000000.5").unwrap();
        assert!(StaticType::DECIMAL.is_instance(&Value::Decimal(wide)));
    }

    #[test]
    fn test_text_length_counts_codepoints() {
        let varchar3 = StaticType::Single(SingleType::varchar_len(3));
        assert!(varchar3.is_instance(&Value::string("héé")));
        assert!(varchar3.is_instance(&Value::string("ab")));
        assert!(!varchar3.is_instance(&Value::string("abcd")));

        let char2 = StaticType::Single(SingleType::char_len(2));
        assert!(char2.is_instance(&Value::string("日本")));
        assert!(!char2.is_instance(&Value::string("日")));
        // CHAR with no declared length is CHAR(1)
        assert!(StaticType::Single(SingleType::Char(None)).is_instance(&Value::string("x")));
    }

    #[test]
    fn test_collection_element_types() {
        let list_of_int = StaticType::Single(SingleType::list_of(StaticType::INT));
        assert!(list_of_int.is_instance(&Value::list([Value::Int(1), Value::Int(2)])));
        assert!(!list_of_int.is_instance(&Value::list([Value::Int(1), Value::string("x")])));
        // Vacuously true for empty collections
        assert!(list_of_int.is_instance(&Value::list([])));
        // Kind mismatch
        assert!(!list_of_int.is_instance(&Value::bag([Value::Int(1)])));
    }

    #[test]
    fn test_struct_conformance() {
        let shape = SingleType::Struct(StructType::new([
            StructField::new("a", StaticType::INT),
            StructField::optional("b", StaticType::STRING),
        ]));
        let ty = StaticType::Single(shape);

        let ok = Value::Struct(StructValue::new().with_field("a", Value::Int(1)));
        assert!(ty.is_instance(&ok));

        // Every occurrence of a duplicated field must conform
        let dup_ok = Value::Struct(
            StructValue::new()
                .with_field("a", Value::Int(1))
                .with_field("a", Value::Int(2)),
        );
        assert!(ty.is_instance(&dup_ok));

        let dup_bad = Value::Struct(
            StructValue::new()
                .with_field("a", Value::Int(1))
                .with_field("a", Value::string("no")),
        );
        assert!(!ty.is_instance(&dup_bad));

        // Required field missing
        let missing = Value::Struct(StructValue::new().with_field("b", Value::string("x")));
        assert!(!ty.is_instance(&missing));
    }

    #[test]
    fn test_struct_closed_content_and_non_text_keys() {
        let open = StaticType::Single(SingleType::Struct(StructType::new([StructField::new(
            "a",
            StaticType::INT,
        )])));
        let closed = StaticType::Single(SingleType::Struct(
            StructType::new([StructField::new("a", StaticType::INT)]).closed(),
        ));

        let with_extra = Value::Struct(
            StructValue::new()
                .with_field("a", Value::Int(1))
                .with_field("extra", Value::Bool(true)),
        );
        assert!(open.is_instance(&with_extra));
        assert!(!closed.is_instance(&with_extra));

        let non_text_key = Value::Struct(
            StructValue::new()
                .with_field("a", Value::Int(1))
                .with_entry(Value::Int(9), Value::Bool(true)),
        );
        assert!(!open.is_instance(&non_text_key));
    }

    #[test]
    fn test_any_and_any_of() {
        assert!(StaticType::ANY.is_instance(&Value::Missing));
        assert!(StaticType::ANY.is_instance(&Value::string("x")));

        let union = StaticType::any_of([SingleType::Int, SingleType::String]);
        assert!(union.is_instance(&Value::Int(5)));
        assert!(union.is_instance(&Value::string("x")));
        assert!(!union.is_instance(&Value::Bool(true)));
    }

    #[test]
    fn test_symbol_is_not_string() {
        assert!(!StaticType::STRING.is_instance(&Value::symbol("s")));
        assert!(StaticType::SYMBOL.is_instance(&Value::symbol("s")));
    }
}
