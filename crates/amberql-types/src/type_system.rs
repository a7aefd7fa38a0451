//! The AmberQL static type lattice
//!
//! This module defines:
//! - `ValueKind`: the runtime kinds a value can manifest as
//! - `ScalarType`: the named, possibly-parameterized type categories
//! - `SingleType`: a scalar category plus its declared parameters
//! - `StaticType`: a single shape or a finite any-of union of shapes
//! - Type domains, domain-subset subtyping, and comparability

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// The runtime kinds a value can manifest as
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ValueKind {
    Null,
    Missing,
    Bool,
    Int,
    Float,
    Decimal,
    Symbol,
    String,
    Clob,
    Blob,
    Date,
    Time,
    Timestamp,
    List,
    Bag,
    Sexp,
    Struct,
}

impl ValueKind {
    /// All runtime kinds, in declaration order
    pub const ALL: &'static [ValueKind] = &[
        Self::Null,
        Self::Missing,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Decimal,
        Self::Symbol,
        Self::String,
        Self::Clob,
        Self::Blob,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::List,
        Self::Bag,
        Self::Sexp,
        Self::Struct,
    ];

    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Decimal)
    }

    /// Check if this kind is text
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::Symbol)
    }

    /// Check if this kind is a large object
    pub const fn is_lob(&self) -> bool {
        matches!(self, Self::Clob | Self::Blob)
    }

    /// Check if this kind is a collection
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::List | Self::Bag | Self::Sexp)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Missing => "MISSING",
            Self::Bool => "BOOL",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Symbol => "SYMBOL",
            Self::String => "STRING",
            Self::Clob => "CLOB",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::List => "LIST",
            Self::Bag => "BAG",
            Self::Sexp => "SEXP",
            Self::Struct => "STRUCT",
        };
        write!(f, "{name}")
    }
}

/// The named scalar type categories of the lattice
///
/// A `ScalarType` is the name-level identity of a type: it carries the stable
/// name, the SQL aliases it is registered under, the runtime kinds it can
/// manifest as, and its declared parameter arity. Parameterized instances are
/// represented by `SingleType`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ScalarType {
    Any,
    Null,
    Missing,
    Bool,
    Int2,
    Int4,
    Int8,
    Int,
    Float,
    Decimal,
    Char,
    Varchar,
    String,
    Symbol,
    Clob,
    Blob,
    Date,
    Time,
    Timestamp,
    List,
    Bag,
    Sexp,
    Struct,
}

impl ScalarType {
    /// All scalar categories, in declaration order
    pub const ALL: &'static [ScalarType] = &[
        Self::Any,
        Self::Null,
        Self::Missing,
        Self::Bool,
        Self::Int2,
        Self::Int4,
        Self::Int8,
        Self::Int,
        Self::Float,
        Self::Decimal,
        Self::Char,
        Self::Varchar,
        Self::String,
        Self::Symbol,
        Self::Clob,
        Self::Blob,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::List,
        Self::Bag,
        Self::Sexp,
        Self::Struct,
    ];

    /// Get the stable name of this category
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Null => "null",
            Self::Missing => "missing",
            Self::Bool => "bool",
            Self::Int2 => "int2",
            Self::Int4 => "int4",
            Self::Int8 => "int8",
            Self::Int => "int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::Varchar => "varchar",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Clob => "clob",
            Self::Blob => "blob",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::List => "list",
            Self::Bag => "bag",
            Self::Sexp => "sexp",
            Self::Struct => "struct",
        }
    }

    /// Get the SQL aliases this category is registered under
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Bool => &["boolean"],
            Self::Int2 => &["smallint", "integer2"],
            Self::Int4 => &["integer4"],
            Self::Int8 => &["bigint", "integer8"],
            Self::Int => &["integer"],
            Self::Float => &["double precision", "real"],
            Self::Decimal => &["dec", "numeric"],
            Self::Char => &["character"],
            Self::Varchar => &["character varying"],
            Self::Struct => &["tuple"],
            _ => &[],
        }
    }

    /// Get the runtime kinds this category can manifest as
    pub const fn domain(&self) -> &'static [ValueKind] {
        match self {
            Self::Any => ValueKind::ALL,
            Self::Null => &[ValueKind::Null],
            Self::Missing => &[ValueKind::Missing],
            Self::Bool => &[ValueKind::Bool],
            Self::Int2 | Self::Int4 | Self::Int8 | Self::Int => &[ValueKind::Int],
            Self::Float => &[ValueKind::Float],
            Self::Decimal => &[ValueKind::Decimal],
            Self::Char | Self::Varchar | Self::String => &[ValueKind::String],
            Self::Symbol => &[ValueKind::Symbol],
            Self::Clob => &[ValueKind::Clob],
            Self::Blob => &[ValueKind::Blob],
            Self::Date => &[ValueKind::Date],
            Self::Time => &[ValueKind::Time],
            Self::Timestamp => &[ValueKind::Timestamp],
            Self::List => &[ValueKind::List],
            Self::Bag => &[ValueKind::Bag],
            Self::Sexp => &[ValueKind::Sexp],
            Self::Struct => &[ValueKind::Struct],
        }
    }

    /// Get the declared parameter arity for type declarations
    pub const fn parameter_arity(&self) -> RangeInclusive<usize> {
        match self {
            Self::Decimal => 0..=2,
            Self::Char | Self::Varchar => 0..=1,
            _ => 0..=0,
        }
    }

    /// Check if this category is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int2 | Self::Int4 | Self::Int8 | Self::Int | Self::Float | Self::Decimal
        )
    }

    /// Check if this category is text
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Char | Self::Varchar | Self::String | Self::Symbol)
    }

    /// Check if this category is a large object
    pub const fn is_lob(&self) -> bool {
        matches!(self, Self::Clob | Self::Blob)
    }

    /// Check if this category is a collection
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::List | Self::Bag | Self::Sexp)
    }

    /// Check if this category is the null or missing type
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Null | Self::Missing)
    }

    /// Position in the fixed numeric promotion order, if numeric
    ///
    /// INT2 < INT4 < INT8 < INT < FLOAT < DECIMAL. Arithmetic results take
    /// the higher-precedence operand's type.
    pub const fn numeric_precedence(&self) -> Option<u8> {
        match self {
            Self::Int2 => Some(0),
            Self::Int4 => Some(1),
            Self::Int8 => Some(2),
            Self::Int => Some(3),
            Self::Float => Some(4),
            Self::Decimal => Some(5),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().to_uppercase())
    }
}

/// Declared precision/scale constraint of a DECIMAL type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum DecimalConstraint {
    /// Any decimal value matches
    #[default]
    Unconstrained,
    /// Bounded precision and scale
    PrecisionScale {
        /// Total significant digits
        precision: u32,
        /// Digits after the decimal point
        scale: u32,
    },
}

/// A compile-time type: one scalar category with its ordered parameters
///
/// Parameters are position-significant: `[precision, scale]` for DECIMAL,
/// `[length]` for CHAR/VARCHAR, the element type for collections, and the
/// field shape for structs. Instances are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SingleType {
    /// The dynamic type; matches every value
    Any,
    /// The null type
    Null,
    /// The missing type
    Missing,
    /// Boolean
    Bool,
    /// 16-bit signed integer range
    Int2,
    /// 32-bit signed integer range
    Int4,
    /// 64-bit signed integer range
    Int8,
    /// Unconstrained integer
    Int,
    /// Approximate numeric
    Float,
    /// Exact numeric with optional precision/scale
    Decimal(DecimalConstraint),
    /// Fixed-length character string; `None` means the SQL default length 1
    Char(Option<u32>),
    /// Variable-length character string; `None` means unbounded
    Varchar(Option<u32>),
    /// Unbounded string
    String,
    /// Symbol
    Symbol,
    /// Character large object
    Clob,
    /// Binary large object
    Blob,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Instant with offset
    Timestamp,
    /// Ordered collection with optional element type
    List(Option<Box<StaticType>>),
    /// Unordered collection with optional element type
    Bag(Option<Box<StaticType>>),
    /// S-expression collection with optional element type
    Sexp(Option<Box<StaticType>>),
    /// Struct with declared field shape
    Struct(StructType),
}

impl SingleType {
    /// Create an unconstrained decimal type
    pub const fn decimal() -> Self {
        Self::Decimal(DecimalConstraint::Unconstrained)
    }

    /// Create a constrained decimal type
    pub const fn decimal_ps(precision: u32, scale: u32) -> Self {
        Self::Decimal(DecimalConstraint::PrecisionScale { precision, scale })
    }

    /// Create a fixed-length character type
    pub const fn char_len(length: u32) -> Self {
        Self::Char(Some(length))
    }

    /// Create a bounded varchar type
    pub const fn varchar_len(length: u32) -> Self {
        Self::Varchar(Some(length))
    }

    /// Create a list type with a declared element type
    pub fn list_of(element: StaticType) -> Self {
        Self::List(Some(Box::new(element)))
    }

    /// Create a bag type with a declared element type
    pub fn bag_of(element: StaticType) -> Self {
        Self::Bag(Some(Box::new(element)))
    }

    /// Create a sexp type with a declared element type
    pub fn sexp_of(element: StaticType) -> Self {
        Self::Sexp(Some(Box::new(element)))
    }

    /// Get the scalar category of this type
    pub const fn scalar(&self) -> ScalarType {
        match self {
            Self::Any => ScalarType::Any,
            Self::Null => ScalarType::Null,
            Self::Missing => ScalarType::Missing,
            Self::Bool => ScalarType::Bool,
            Self::Int2 => ScalarType::Int2,
            Self::Int4 => ScalarType::Int4,
            Self::Int8 => ScalarType::Int8,
            Self::Int => ScalarType::Int,
            Self::Float => ScalarType::Float,
            Self::Decimal(_) => ScalarType::Decimal,
            Self::Char(_) => ScalarType::Char,
            Self::Varchar(_) => ScalarType::Varchar,
            Self::String => ScalarType::String,
            Self::Symbol => ScalarType::Symbol,
            Self::Clob => ScalarType::Clob,
            Self::Blob => ScalarType::Blob,
            Self::Date => ScalarType::Date,
            Self::Time => ScalarType::Time,
            Self::Timestamp => ScalarType::Timestamp,
            Self::List(_) => ScalarType::List,
            Self::Bag(_) => ScalarType::Bag,
            Self::Sexp(_) => ScalarType::Sexp,
            Self::Struct(_) => ScalarType::Struct,
        }
    }

    /// Get the runtime kinds this type can manifest as
    pub const fn domain(&self) -> &'static [ValueKind] {
        self.scalar().domain()
    }

    /// Check if this type is numeric
    pub const fn is_numeric(&self) -> bool {
        self.scalar().is_numeric()
    }

    /// Check if this type is text
    pub const fn is_text(&self) -> bool {
        self.scalar().is_text()
    }

    /// Check if this type is the null or missing type
    pub const fn is_unknown(&self) -> bool {
        self.scalar().is_unknown()
    }

    /// Check if this type is unbounded text (no declared length constraint)
    pub const fn is_unbounded_text(&self) -> bool {
        matches!(self, Self::String | Self::Symbol | Self::Varchar(None))
    }

    /// Get the declared element type for collections
    pub fn element_type(&self) -> Option<&StaticType> {
        match self {
            Self::List(e) | Self::Bag(e) | Self::Sexp(e) => e.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for SingleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(DecimalConstraint::PrecisionScale { precision, scale }) => {
                write!(f, "DECIMAL({precision},{scale})")
            }
            Self::Char(Some(n)) => write!(f, "CHAR({n})"),
            Self::Varchar(Some(n)) => write!(f, "VARCHAR({n})"),
            Self::List(Some(e)) => write!(f, "LIST<{e}>"),
            Self::Bag(Some(e)) => write!(f, "BAG<{e}>"),
            Self::Sexp(Some(e)) => write!(f, "SEXP<{e}>"),
            Self::Struct(s) if !s.fields.is_empty() => write!(f, "{s}"),
            other => write!(f, "{}", other.scalar()),
        }
    }
}

impl From<ScalarType> for SingleType {
    /// The unconstrained instance of a scalar category
    fn from(scalar: ScalarType) -> Self {
        match scalar {
            ScalarType::Any => Self::Any,
            ScalarType::Null => Self::Null,
            ScalarType::Missing => Self::Missing,
            ScalarType::Bool => Self::Bool,
            ScalarType::Int2 => Self::Int2,
            ScalarType::Int4 => Self::Int4,
            ScalarType::Int8 => Self::Int8,
            ScalarType::Int => Self::Int,
            ScalarType::Float => Self::Float,
            ScalarType::Decimal => Self::decimal(),
            ScalarType::Char => Self::Char(None),
            ScalarType::Varchar => Self::Varchar(None),
            ScalarType::String => Self::String,
            ScalarType::Symbol => Self::Symbol,
            ScalarType::Clob => Self::Clob,
            ScalarType::Blob => Self::Blob,
            ScalarType::Date => Self::Date,
            ScalarType::Time => Self::Time,
            ScalarType::Timestamp => Self::Timestamp,
            ScalarType::List => Self::List(None),
            ScalarType::Bag => Self::Bag(None),
            ScalarType::Sexp => Self::Sexp(None),
            ScalarType::Struct => Self::Struct(StructType::open()),
        }
    }
}

/// Declared shape of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StructType {
    /// Declared fields, in declaration order
    pub fields: Vec<StructField>,
    /// Whether undeclared fields are rejected by conformance checking
    pub content_closed: bool,
}

impl StructType {
    /// Create an open struct type with no declared fields
    pub fn open() -> Self {
        Self::default()
    }

    /// Create a struct type with declared fields
    pub fn new(fields: impl IntoIterator<Item = StructField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            content_closed: false,
        }
    }

    /// Mark the content as closed
    pub fn closed(mut self) -> Self {
        self.content_closed = true;
        self
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STRUCT<")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, field.ty)?;
            if field.optional {
                write!(f, "?")?;
            }
        }
        write!(f, ">")
    }
}

/// One declared field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    /// Field name
    pub name: String,
    /// Declared field type
    pub ty: StaticType,
    /// Whether the field may be absent
    pub optional: bool,
}

impl StructField {
    /// Create a required field
    pub fn new(name: impl Into<String>, ty: StaticType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// Create an optional field
    pub fn optional(name: impl Into<String>, ty: StaticType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// A static type: one shape, or a finite any-of union of shapes
///
/// The type domain of an any-of is the union of its members' domains, and
/// comparability of two any-of types holds iff some pair of non-unknown
/// members is comparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticType {
    /// A single scalar shape
    Single(SingleType),
    /// A finite set of alternative shapes
    AnyOf(Vec<SingleType>),
}

impl StaticType {
    /// The dynamic type
    pub const ANY: StaticType = StaticType::Single(SingleType::Any);
    /// The null type
    pub const NULL: StaticType = StaticType::Single(SingleType::Null);
    /// The missing type
    pub const MISSING: StaticType = StaticType::Single(SingleType::Missing);
    /// Boolean
    pub const BOOL: StaticType = StaticType::Single(SingleType::Bool);
    /// 16-bit integer range
    pub const INT2: StaticType = StaticType::Single(SingleType::Int2);
    /// 32-bit integer range
    pub const INT4: StaticType = StaticType::Single(SingleType::Int4);
    /// 64-bit integer range
    pub const INT8: StaticType = StaticType::Single(SingleType::Int8);
    /// Unconstrained integer
    pub const INT: StaticType = StaticType::Single(SingleType::Int);
    /// Approximate numeric
    pub const FLOAT: StaticType = StaticType::Single(SingleType::Float);
    /// Unconstrained decimal
    pub const DECIMAL: StaticType =
        StaticType::Single(SingleType::Decimal(DecimalConstraint::Unconstrained));
    /// Unbounded string
    pub const STRING: StaticType = StaticType::Single(SingleType::String);
    /// Symbol
    pub const SYMBOL: StaticType = StaticType::Single(SingleType::Symbol);

    /// Build an any-of type, deduplicating members and collapsing singletons
    pub fn any_of(members: impl IntoIterator<Item = SingleType>) -> Self {
        let mut unique: Vec<SingleType> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        match unique.len() {
            1 => Self::Single(unique.pop().expect("non-empty")),
            _ => Self::AnyOf(unique),
        }
    }

    /// Iterate the member shapes (a single type has one member)
    pub fn members(&self) -> impl Iterator<Item = &SingleType> {
        match self {
            Self::Single(s) => std::slice::from_ref(s).iter(),
            Self::AnyOf(v) => v.iter(),
        }
    }

    /// Get the single shape if this is not a union
    pub fn as_single(&self) -> Option<&SingleType> {
        match self {
            Self::Single(s) => Some(s),
            Self::AnyOf(_) => None,
        }
    }

    /// Get the runtime kinds this type can manifest as
    pub fn domain(&self) -> std::collections::BTreeSet<ValueKind> {
        self.members()
            .flat_map(|m| m.domain().iter().copied())
            .collect()
    }

    /// Check if this type's domain is a non-empty subset of another's
    pub fn is_subtype_of(&self, parent: &StaticType) -> bool {
        let child_domain = self.domain();
        if child_domain.is_empty() {
            return false;
        }
        let parent_domain = parent.domain();
        child_domain.is_subset(&parent_domain)
    }

    /// Check if two static types are comparable
    ///
    /// Null/missing-only types are comparable to anything. Two shapes are
    /// comparable when both are numeric, both are text, both are lobs, or
    /// they share a runtime kind; any-of types compare pairwise over their
    /// non-unknown members.
    pub fn is_comparable_to(&self, other: &StaticType) -> bool {
        let lhs: Vec<&SingleType> = self.members().filter(|m| !m.is_unknown()).collect();
        let rhs: Vec<&SingleType> = other.members().filter(|m| !m.is_unknown()).collect();
        if lhs.is_empty() || rhs.is_empty() {
            return true;
        }
        lhs.iter()
            .any(|a| rhs.iter().any(|b| singles_comparable(a, b)))
    }
}

fn singles_comparable(a: &SingleType, b: &SingleType) -> bool {
    let (sa, sb) = (a.scalar(), b.scalar());
    if sa.is_numeric() && sb.is_numeric() {
        return true;
    }
    if sa.is_text() && sb.is_text() {
        return true;
    }
    if sa.is_lob() && sb.is_lob() {
        return true;
    }
    sa.domain().iter().any(|k| sb.domain().contains(k))
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(s) => write!(f, "{s}"),
            Self::AnyOf(members) => {
                write!(f, "ANY_OF(")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<SingleType> for StaticType {
    fn from(single: SingleType) -> Self {
        Self::Single(single)
    }
}

impl From<ScalarType> for StaticType {
    fn from(scalar: ScalarType) -> Self {
        Self::Single(scalar.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_domains() {
        assert_eq!(ScalarType::Int2.domain(), &[ValueKind::Int]);
        assert_eq!(ScalarType::Varchar.domain(), &[ValueKind::String]);
        assert_eq!(ScalarType::Any.domain().len(), ValueKind::ALL.len());
    }

    #[test]
    fn test_numeric_precedence_order() {
        let order = [
            ScalarType::Int2,
            ScalarType::Int4,
            ScalarType::Int8,
            ScalarType::Int,
            ScalarType::Float,
            ScalarType::Decimal,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].numeric_precedence() < pair[1].numeric_precedence());
        }
        assert_eq!(ScalarType::Bool.numeric_precedence(), None);
    }

    #[test]
    fn test_subtyping_is_domain_subset() {
        assert!(StaticType::INT2.is_subtype_of(&StaticType::INT8));
        assert!(StaticType::INT8.is_subtype_of(&StaticType::INT2));
        assert!(StaticType::INT.is_subtype_of(&StaticType::ANY));
        assert!(!StaticType::ANY.is_subtype_of(&StaticType::INT));
        assert!(!StaticType::STRING.is_subtype_of(&StaticType::INT));
    }

    #[test]
    fn test_comparability_classes() {
        // Numeric with numeric, across runtime kinds
        assert!(StaticType::INT.is_comparable_to(&StaticType::DECIMAL));
        // Text with text
        assert!(StaticType::SYMBOL.is_comparable_to(&StaticType::STRING));
        // Null-only types compare to anything
        assert!(StaticType::NULL.is_comparable_to(&StaticType::STRING));
        assert!(StaticType::MISSING.is_comparable_to(&StaticType::BOOL));
        // Disjoint kinds do not compare
        assert!(!StaticType::BOOL.is_comparable_to(&StaticType::STRING));
    }

    #[test]
    fn test_any_of_comparability_lifts_pairwise() {
        let union = StaticType::any_of([SingleType::Bool, SingleType::Int]);
        assert!(union.is_comparable_to(&StaticType::DECIMAL));
        let text_union = StaticType::any_of([SingleType::Null, SingleType::String]);
        assert!(text_union.is_comparable_to(&StaticType::SYMBOL));
        assert!(!StaticType::any_of([SingleType::Bool]).is_comparable_to(&StaticType::STRING));
    }

    #[test]
    fn test_any_of_dedup_and_collapse() {
        let t = StaticType::any_of([SingleType::Int, SingleType::Int]);
        assert_eq!(t, StaticType::INT);
        let t = StaticType::any_of([SingleType::Int, SingleType::Float, SingleType::Int]);
        assert_eq!(
            t,
            StaticType::AnyOf(vec![SingleType::Int, SingleType::Float])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SingleType::decimal_ps(10, 2).to_string(), "DECIMAL(10,2)");
        assert_eq!(SingleType::varchar_len(5).to_string(), "VARCHAR(5)");
        assert_eq!(
            SingleType::list_of(StaticType::INT).to_string(),
            "LIST<INT>"
        );
    }
}
