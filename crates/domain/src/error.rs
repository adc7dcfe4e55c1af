//! Unified error types for the domain layer
//!
//! `ReportParseError` and `TemplateError` are the two user-visible failures
//! (invalid MDW text and invalid citation template). `DomainError` wraps them
//! together with validation failures so callers can use a single type.

use thiserror::Error;

use crate::template::TemplateError;

/// Error when pasted MDW output cannot be turned into a citation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportParseError {
    /// No line of the form `Full Name (#1234)` was found
    #[error("Unexpected MDW output: no suspect name line")]
    MissingName,
    /// No sentencing line followed the `Warrant for Arrest` marker
    #[error("Unexpected MDW output: no sentencing line")]
    MissingFine,
    /// The sentencing line carried an unreadable amount
    #[error("Unexpected MDW output: invalid fine amount '{0}'")]
    InvalidFine(String),
    /// The sentencing line carried an unreadable point count
    #[error("Unexpected MDW output: invalid point count '{0}'")]
    InvalidPoints(String),
}

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// MDW output could not be parsed
    #[error(transparent)]
    InvalidReportText(#[from] ReportParseError),

    /// Citation template failed to compile or render
    #[error("Template is invalid: {0}")]
    InvalidTemplate(#[from] TemplateError),
}

impl DomainError {
    /// Creates a validation error for rejected field values.
    ///
    /// # Example
    /// ```ignore
    /// if !value.is_finite() {
    ///     return Err(DomainError::validation("Fine must be a finite number"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("fine must be a number");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: fine must be a number");
    }

    #[test]
    fn test_from_report_parse_error() {
        let err: DomainError = ReportParseError::MissingName.into();
        assert!(matches!(err, DomainError::InvalidReportText(_)));
        assert!(err.to_string().contains("no suspect name"));
    }

    #[test]
    fn test_from_template_error() {
        let err: DomainError = TemplateError::UnknownHelper("with".into()).into();
        assert!(matches!(err, DomainError::InvalidTemplate(_)));
        assert!(err.to_string().starts_with("Template is invalid"));
    }
}
