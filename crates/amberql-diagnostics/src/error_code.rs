//! AmberQL error codes following a structured numbering system
//!
//! Error code ranges:
//! - AQ0001-AQ0099: Parse errors (syntax; reserved for the parser layer)
//! - AQ0100-AQ0199: Semantic errors (type checking, resolution)
//! - AQ0200-AQ0299: Evaluation errors (runtime; reserved for the evaluator)
//! - AQ0400-AQ0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a parse error (0001-0099)
    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a semantic error (0100-0199)
    pub const fn is_semantic_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an evaluation error (0200-0299)
    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AQ{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Parse errors (0001-0099); the parser layer owns these
    map.insert(1, ErrorInfo::new("Unexpected token"));
    map.insert(2, ErrorInfo::new("Unexpected end of input"));
    map.insert(3, ErrorInfo::new("Invalid literal"));

    // Semantic errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Undefined variable")
            .with_help("Check that the variable is bound in the enclosing scope"),
    );
    map.insert(101, ErrorInfo::new("Undefined function"));
    map.insert(102, ErrorInfo::new("Undefined type"));
    map.insert(
        103,
        ErrorInfo::new("Invalid type parameter count")
            .with_help("Check the declared parameter arity for the type"),
    );
    map.insert(
        104,
        ErrorInfo::new("Invalid type parameter value")
            .with_help("DECIMAL scale must be between 0 and the declared precision"),
    );
    map.insert(105, ErrorInfo::new("Operator type mismatch"));
    map.insert(106, ErrorInfo::new("No matching function overload"));
    map.insert(107, ErrorInfo::new("Incomparable operand types"));
    map.insert(108, ErrorInfo::new("Invalid exclude path"));

    // Evaluation errors (0200-0299); the evaluator layer owns these
    map.insert(200, ErrorInfo::new("Evaluation failed"));
    map.insert(201, ErrorInfo::new("Division by zero"));
    map.insert(202, ErrorInfo::new("Invalid cast"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("I/O error"));
    map.insert(401, ErrorInfo::new("Configuration error"));

    map
});

/// Undefined variable
pub const AQ0100: ErrorCode = ErrorCode::new(100);
/// Undefined function
pub const AQ0101: ErrorCode = ErrorCode::new(101);
/// Undefined type
pub const AQ0102: ErrorCode = ErrorCode::new(102);
/// Invalid type parameter count
pub const AQ0103: ErrorCode = ErrorCode::new(103);
/// Invalid type parameter value
pub const AQ0104: ErrorCode = ErrorCode::new(104);
/// Operator type mismatch
pub const AQ0105: ErrorCode = ErrorCode::new(105);
/// No matching function overload
pub const AQ0106: ErrorCode = ErrorCode::new(106);
/// Incomparable operand types
pub const AQ0107: ErrorCode = ErrorCode::new(107);
/// Invalid exclude path
pub const AQ0108: ErrorCode = ErrorCode::new(108);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(AQ0105.to_string(), "AQ0105");
    }

    #[test]
    fn test_error_code_ranges() {
        assert!(AQ0100.is_semantic_error());
        assert!(!AQ0100.is_parse_error());
        assert!(ErrorCode::new(201).is_evaluation_error());
    }

    #[test]
    fn test_error_info_lookup() {
        assert_eq!(AQ0104.info().description, "Invalid type parameter value");
        assert!(AQ0104.info().help.is_some());
        assert_eq!(ErrorCode::new(9999).info().description, "Unknown error");
    }
}
