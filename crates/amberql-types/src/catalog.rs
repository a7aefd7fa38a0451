//! Builtin scalar-type catalog
//!
//! A build-once registry mapping type names and SQL aliases to their scalar
//! category. Instantiation validates parameter arity and value ranges before
//! a type is admitted into the lattice: a malformed declaration is a
//! compile-time semantic error, not an inference failure.

use indexmap::IndexMap;
use std::sync::LazyLock;
use thiserror::Error;

use amberql_ast::TypeReference;

use crate::type_system::{ScalarType, SingleType};

/// Type declaration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeDeclarationError {
    /// The type name is not registered
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },

    /// Wrong number of parameters for the type
    #[error("Type {name} takes at most {max} parameters, found {found}")]
    WrongParameterCount {
        name: &'static str,
        max: usize,
        found: usize,
    },

    /// DECIMAL scale outside [0, precision]
    #[error("DECIMAL scale {scale} must be between 0 and precision {precision}")]
    InvalidScale { precision: u32, scale: u32 },

    /// Zero precision or length
    #[error("Type {name} parameter must be at least 1, found {found}")]
    InvalidParameter { name: &'static str, found: u32 },
}

/// Result type for type declarations
pub type TypeDeclarationResult<T> = Result<T, TypeDeclarationError>;

/// The builtin scalar-type catalog
///
/// Stateless and built once; safe for unsynchronized concurrent reads.
#[derive(Debug)]
pub struct TypeCatalog {
    by_name: IndexMap<&'static str, ScalarType>,
}

static GLOBAL: LazyLock<TypeCatalog> = LazyLock::new(TypeCatalog::with_builtins);

impl TypeCatalog {
    /// Get the global catalog
    pub fn global() -> &'static TypeCatalog {
        &GLOBAL
    }

    /// Build the catalog from the builtin scalar categories
    fn with_builtins() -> Self {
        let mut by_name = IndexMap::new();
        for scalar in ScalarType::ALL {
            by_name.insert(scalar.name(), *scalar);
            for alias in scalar.aliases() {
                by_name.insert(*alias, *scalar);
            }
        }
        Self { by_name }
    }

    /// Look up a scalar category by name or alias (case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<ScalarType> {
        let lowered = name.to_ascii_lowercase();
        self.by_name.get(lowered.as_str()).copied()
    }

    /// Resolve a source type reference into a lattice type
    ///
    /// Validates parameter arity and ranges; DECIMAL requires
    /// scale ∈ [0, precision].
    pub fn instantiate(&self, reference: &TypeReference) -> TypeDeclarationResult<SingleType> {
        let scalar = self
            .lookup(&reference.name)
            .ok_or_else(|| TypeDeclarationError::UnknownType {
                name: reference.name.clone(),
            })?;
        self.instantiate_scalar(scalar, &reference.parameters)
    }

    /// Instantiate a scalar category with explicit parameters
    pub fn instantiate_scalar(
        &self,
        scalar: ScalarType,
        parameters: &[u32],
    ) -> TypeDeclarationResult<SingleType> {
        let arity = scalar.parameter_arity();
        if !arity.contains(&parameters.len()) {
            return Err(TypeDeclarationError::WrongParameterCount {
                name: scalar.name(),
                max: *arity.end(),
                found: parameters.len(),
            });
        }

        match scalar {
            ScalarType::Decimal => match *parameters {
                [] => Ok(SingleType::decimal()),
                [precision] => instantiate_decimal(precision, 0),
                [precision, scale] => instantiate_decimal(precision, scale),
                _ => unreachable!("arity checked above"),
            },
            ScalarType::Char => match *parameters {
                [] => Ok(SingleType::Char(None)),
                [length] => {
                    check_at_least_one(scalar, length)?;
                    Ok(SingleType::char_len(length))
                }
                _ => unreachable!("arity checked above"),
            },
            ScalarType::Varchar => match *parameters {
                [] => Ok(SingleType::Varchar(None)),
                [length] => {
                    check_at_least_one(scalar, length)?;
                    Ok(SingleType::varchar_len(length))
                }
                _ => unreachable!("arity checked above"),
            },
            other => Ok(other.into()),
        }
    }
}

fn instantiate_decimal(precision: u32, scale: u32) -> TypeDeclarationResult<SingleType> {
    if precision == 0 {
        return Err(TypeDeclarationError::InvalidParameter {
            name: ScalarType::Decimal.name(),
            found: precision,
        });
    }
    if scale > precision {
        return Err(TypeDeclarationError::InvalidScale { precision, scale });
    }
    Ok(SingleType::decimal_ps(precision, scale))
}

fn check_at_least_one(scalar: ScalarType, value: u32) -> TypeDeclarationResult<()> {
    if value == 0 {
        return Err(TypeDeclarationError::InvalidParameter {
            name: scalar.name(),
            found: value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_lookup_by_name_and_alias() {
        let catalog = TypeCatalog::global();
        assert_eq!(catalog.lookup("int2"), Some(ScalarType::Int2));
        assert_eq!(catalog.lookup("SMALLINT"), Some(ScalarType::Int2));
        assert_eq!(catalog.lookup("character varying"), Some(ScalarType::Varchar));
        assert_eq!(catalog.lookup("tuple"), Some(ScalarType::Struct));
        assert_eq!(catalog.lookup("nope"), None);
    }

    #[test]
    fn test_instantiate_decimal() {
        let catalog = TypeCatalog::global();
        let reference = TypeReference::with_parameters("decimal", smallvec![10u32, 2u32]);
        assert_eq!(
            catalog.instantiate(&reference),
            Ok(SingleType::decimal_ps(10, 2))
        );

        let reference = TypeReference::new("numeric");
        assert_eq!(catalog.instantiate(&reference), Ok(SingleType::decimal()));
    }

    #[test]
    fn test_decimal_scale_must_fit_precision() {
        let catalog = TypeCatalog::global();
        let reference = TypeReference::with_parameters("decimal", smallvec![2u32, 4u32]);
        assert_eq!(
            catalog.instantiate(&reference),
            Err(TypeDeclarationError::InvalidScale {
                precision: 2,
                scale: 4
            })
        );
    }

    #[test]
    fn test_parameter_arity_is_validated() {
        let catalog = TypeCatalog::global();
        let reference = TypeReference::with_parameters("char", smallvec![3u32, 4u32]);
        assert!(matches!(
            catalog.instantiate(&reference),
            Err(TypeDeclarationError::WrongParameterCount { .. })
        ));

        let reference = TypeReference::with_parameters("bool", smallvec![1u32]);
        assert!(matches!(
            catalog.instantiate(&reference),
            Err(TypeDeclarationError::WrongParameterCount { .. })
        ));
    }

    #[test]
    fn test_unknown_type() {
        let catalog = TypeCatalog::global();
        let reference = TypeReference::new("wobble");
        assert!(matches!(
            catalog.instantiate(&reference),
            Err(TypeDeclarationError::UnknownType { .. })
        ));
    }
}
