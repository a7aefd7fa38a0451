//! AmberQL error types

use crate::{ErrorCode, SourceLocation, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - compilation cannot produce an executable plan
    Error,
    /// Warning - potential issue but compilation can continue
    Warning,
    /// Information - informational message
    Info,
    /// Hint - suggestion for improvement
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Source location
    pub location: Option<SourceLocation>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the span (converts to location using provided source)
    pub fn with_span(mut self, span: Span, source: &str) -> Self {
        self.location = Some(SourceLocation::from_span(span, source));
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Main AmberQL error type
#[derive(Debug, Clone, Error)]
pub enum AmberError {
    /// Parse error
    #[error("{code}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        location: Option<SourceLocation>,
    },

    /// Semantic error (type checking, resolution)
    #[error("{code}: {message}")]
    Semantic {
        code: ErrorCode,
        message: String,
        location: Option<SourceLocation>,
    },

    /// Evaluation error
    #[error("{code}: {message}")]
    Evaluation {
        code: ErrorCode,
        message: String,
        location: Option<SourceLocation>,
    },

    /// System error
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },

    /// Multiple errors collected
    #[error("Multiple errors: {}", .0.len())]
    Multiple(Vec<AmberError>),
}

impl AmberError {
    /// Create a semantic error
    pub fn semantic(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Semantic {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Create a semantic error with location
    pub fn semantic_at(
        code: ErrorCode,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::Semantic {
            code,
            message: message.into(),
            location: Some(location),
        }
    }

    /// Create an evaluation error
    pub fn evaluation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Evaluation {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. }
            | Self::Semantic { code, .. }
            | Self::Evaluation { code, .. }
            | Self::System { code, .. } => *code,
            Self::Multiple(errors) => errors
                .first()
                .map(AmberError::code)
                .unwrap_or(ErrorCode::new(0)),
        }
    }
}

impl From<Diagnostic> for AmberError {
    fn from(diag: Diagnostic) -> Self {
        Self::Semantic {
            code: diag.code,
            message: diag.message,
            location: diag.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AQ0105;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(AQ0105, "operand is not numeric")
            .with_location(SourceLocation::point(3, 7, 21));
        assert_eq!(
            diag.to_string(),
            "error: AQ0105 - operand is not numeric at 3:7"
        );
    }

    #[test]
    fn test_error_code_accessor() {
        let err = AmberError::semantic(AQ0105, "bad operands");
        assert_eq!(err.code(), AQ0105);
    }
}
