//! EXCLUDE-clause path nodes
//!
//! `SELECT * EXCLUDE t.a, t.b[1].*` parses into one `ExcludePath` per
//! comma-separated item. The semantic core compiles these into a reduced
//! exclusion forest; the step vocabulary here is shared with that output.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Case sensitivity of a struct-field step
///
/// `t.c` and `t."c"` are distinct steps even when the literal name matches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CaseSensitivity {
    /// Unquoted field reference; matches by case-insensitive lookup
    Insensitive,
    /// Quoted field reference; matches exactly
    Sensitive,
}

/// One navigation step in an exclusion path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExcludeStep {
    /// Descend into a named struct field
    StructField {
        /// Field name as written
        name: String,
        /// Whether the name matches case-sensitively
        case: CaseSensitivity,
    },
    /// Descend into a collection element by index
    CollectionIndex(u32),
    /// Descend into every collection element
    CollectionWildcard,
    /// Descend into every struct field
    StructWildcard,
}

impl ExcludeStep {
    /// Create a case-insensitive struct field step
    pub fn field(name: impl Into<String>) -> Self {
        Self::StructField {
            name: name.into(),
            case: CaseSensitivity::Insensitive,
        }
    }

    /// Create a case-sensitive struct field step
    pub fn field_sensitive(name: impl Into<String>) -> Self {
        Self::StructField {
            name: name.into(),
            case: CaseSensitivity::Sensitive,
        }
    }

    /// Check if this is a field-level step (named or wildcard)
    pub const fn is_struct_step(&self) -> bool {
        matches!(self, Self::StructField { .. } | Self::StructWildcard)
    }

    /// Check if this is a collection-level step (indexed or wildcard)
    pub const fn is_collection_step(&self) -> bool {
        matches!(self, Self::CollectionIndex(_) | Self::CollectionWildcard)
    }
}

impl fmt::Display for ExcludeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructField { name, case } => match case {
                CaseSensitivity::Insensitive => write!(f, ".{name}"),
                CaseSensitivity::Sensitive => write!(f, ".\"{name}\""),
            },
            Self::CollectionIndex(i) => write!(f, "[{i}]"),
            Self::CollectionWildcard => write!(f, "[*]"),
            Self::StructWildcard => write!(f, ".*"),
        }
    }
}

/// A parsed exclusion path rooted at a FROM-clause variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludePath {
    /// Index of the root variable in the FROM clause
    pub root: usize,
    /// Ordered navigation steps from the root
    pub steps: SmallVec<[ExcludeStep; 4]>,
}

impl ExcludePath {
    /// Create a new exclusion path
    pub fn new(root: usize, steps: impl IntoIterator<Item = ExcludeStep>) -> Self {
        Self {
            root,
            steps: steps.into_iter().collect(),
        }
    }
}

impl fmt::Display for ExcludePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.root)?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
