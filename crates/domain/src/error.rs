//! Domain error types

use thiserror::Error;

/// Placeholder used when a variable cannot be identified by name.
pub const UNKNOWN_VARIABLE: &str = "unknown";

/// Domain-level errors that can occur while building or processing a profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The document is not well-formed or lacks a root element.
    #[error("malformed document: {0}")]
    Parse(String),

    /// A variable element lacks an element required for processing it.
    #[error("variable '{variable}' is missing the required <{field}> element")]
    MissingField {
        /// Name of the offending variable, or `unknown`.
        variable: String,
        /// Name of the missing child element.
        field: &'static str,
    },
}

impl DomainError {
    /// Creates a parse error from any displayable reason.
    pub fn parse(reason: impl std::fmt::Display) -> Self {
        Self::Parse(reason.to_string())
    }

    /// Creates a schema error for a variable missing a field.
    pub fn missing_field(variable: Option<&str>, field: &'static str) -> Self {
        Self::MissingField {
            variable: variable.unwrap_or(UNKNOWN_VARIABLE).to_string(),
            field,
        }
    }

    /// Returns true for errors raised while reading document structure.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
