//! Function signatures
//!
//! A signature's identity key (its "specific name") is derived from the
//! function name, parameter types, and return type at construction, so
//! signatures are comparable and hashable by identity alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::type_system::SingleType;

/// One declared parameter of a function signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FnParameter {
    /// Parameter name
    pub name: String,
    /// Declared parameter type
    pub ty: SingleType,
}

impl FnParameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, ty: SingleType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function or operator signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FnSignature {
    name: String,
    parameters: Vec<FnParameter>,
    return_type: SingleType,
    specific_name: String,
    /// Same inputs always produce the same output
    pub is_deterministic: bool,
    /// The return value may be null
    pub is_nullable: bool,
    /// Invoke on null arguments instead of propagating null
    pub is_null_call: bool,
    /// The return value may be missing
    pub is_missable: bool,
    /// Invoke on missing arguments instead of propagating missing
    pub is_missing_call: bool,
}

impl FnSignature {
    /// Create a new signature with default flags
    ///
    /// Defaults: deterministic, nullable, not null-call, not missable, not
    /// missing-call.
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<FnParameter>,
        return_type: SingleType,
    ) -> Self {
        let name = name.into().to_ascii_lowercase();
        let specific_name = derive_specific_name(&name, &parameters, &return_type);
        Self {
            name,
            parameters,
            return_type,
            specific_name,
            is_deterministic: true,
            is_nullable: true,
            is_null_call: false,
            is_missable: false,
            is_missing_call: false,
        }
    }

    /// Mark as non-deterministic
    pub fn non_deterministic(mut self) -> Self {
        self.is_deterministic = false;
        self
    }

    /// Mark the return value as never null
    pub fn non_nullable(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    /// Invoke on null arguments
    pub fn null_call(mut self) -> Self {
        self.is_null_call = true;
        self
    }

    /// Mark the return value as possibly missing
    pub fn missable(mut self) -> Self {
        self.is_missable = true;
        self
    }

    /// Invoke on missing arguments
    pub fn missing_call(mut self) -> Self {
        self.is_missing_call = true;
        self
    }

    /// Get the function name (lowercased)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared parameters
    pub fn parameters(&self) -> &[FnParameter] {
        &self.parameters
    }

    /// Get the declared return type
    pub fn return_type(&self) -> &SingleType {
        &self.return_type
    }

    /// Get the identity key of this signature
    pub fn specific_name(&self) -> &str {
        &self.specific_name
    }

    /// Get the parameter count
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// `name__param1_param2__return`, lowercased scalar names
fn derive_specific_name(
    name: &str,
    parameters: &[FnParameter],
    return_type: &SingleType,
) -> String {
    let params = parameters
        .iter()
        .map(|p| p.ty.scalar().name())
        .collect::<Vec<_>>()
        .join("_");
    format!("{}__{}__{}", name, params, return_type.scalar().name())
}

impl PartialEq for FnSignature {
    fn eq(&self, other: &Self) -> bool {
        self.specific_name == other.specific_name
    }
}

impl Eq for FnSignature {}

impl Hash for FnSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.specific_name.hash(state);
    }
}

impl fmt::Display for FnSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", p.name, p.ty)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs_int() -> FnSignature {
        FnSignature::new(
            "Abs",
            vec![FnParameter::new("value", SingleType::Int)],
            SingleType::Int,
        )
    }

    #[test]
    fn test_specific_name_derivation() {
        assert_eq!(abs_int().specific_name(), "abs__int__int");

        let two_arg = FnSignature::new(
            "mod",
            vec![
                FnParameter::new("dividend", SingleType::Int8),
                FnParameter::new("divisor", SingleType::Int8),
            ],
            SingleType::Int8,
        );
        assert_eq!(two_arg.specific_name(), "mod__int8_int8__int8");
    }

    #[test]
    fn test_identity_by_specific_name() {
        let a = abs_int();
        // Flags do not change identity
        let b = abs_int().non_deterministic().missable();
        assert_eq!(a, b);

        let c = FnSignature::new(
            "abs",
            vec![FnParameter::new("value", SingleType::Float)],
            SingleType::Float,
        );
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_flags() {
        let sig = abs_int();
        assert!(sig.is_deterministic);
        assert!(sig.is_nullable);
        assert!(!sig.is_null_call);
        assert!(!sig.is_missable);
        assert!(!sig.is_missing_call);
    }

    #[test]
    fn test_display() {
        assert_eq!(abs_int().to_string(), "abs(value: INT) -> INT");
    }
}
