//! Type references as written in source
//!
//! A `TypeReference` is the unresolved form of a type declaration, e.g.
//! `DECIMAL(10,2)` or `VARCHAR(5)`. The type catalog resolves it into a
//! lattice type, validating parameter arity and ranges in the process.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// An unresolved type declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    /// Type name or alias as written (case-insensitive)
    pub name: String,
    /// Ordered numeric parameters (position-significant)
    pub parameters: SmallVec<[u32; 2]>,
}

impl TypeReference {
    /// Create an unparameterized type reference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: SmallVec::new(),
        }
    }

    /// Create a parameterized type reference
    pub fn with_parameters(name: impl Into<String>, parameters: impl Into<SmallVec<[u32; 2]>>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into(),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            write!(f, "(")?;
            for (i, p) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
