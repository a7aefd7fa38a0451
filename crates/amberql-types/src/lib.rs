//! AmberQL type system and semantic analysis
//!
//! This crate is the semantic-analysis core of the AmberQL compiler:
//! - The static type lattice (scalar types, parameterization, any-of unions)
//! - The value-conformance predicate (`is_instance`)
//! - Tri-state operator type-inference rules
//! - Function/operator overload resolution against a typed signature catalog
//! - The EXCLUDE-path subsumption compiler
//! - The semantic pass producing annotated expression trees

pub mod catalog;
pub mod coercion;
pub mod inference;
pub mod instance;
pub mod semantic;
pub mod type_system;
pub mod value;

pub use catalog::{TypeCatalog, TypeDeclarationError};
pub use inference::TypeInferenceResult;
pub use semantic::{
    CompiledExcludeItem, ExcludeBranch, ExcludeLeaf, FnMatch, FnParameter, FnRegistry,
    FnSignature, SemanticAnalyzer, TypeEnvironment, TypedExpr,
};
pub use type_system::{
    DecimalConstraint, ScalarType, SingleType, StaticType, StructField, StructType, ValueKind,
};
pub use value::{StructValue, Value};
