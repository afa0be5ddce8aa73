//! Error vocabulary shared by every layer.
//!
//! Layers raise their own `thiserror` enums; [`DomainError`] is the flat
//! carrier they convert into at the edge, keyed by a stable [`ErrorCode`].

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A value rejected where it entered the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be greater than zero, got {actual}")]
    NotPositive { field: String, actual: f64 },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("No project has been started")]
    NoActiveProject,
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    pub fn not_positive(field: impl Into<String>, actual: f64) -> Self {
        Self::NotPositive {
            field: field.into(),
            actual,
        }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Offending field name, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::EmptyField { field }
            | Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => Some(field),
            Self::NoActiveProject => None,
        }
    }
}

/// Stable identifiers for failures crossing the core boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyField,
    NotPositive,
    OutOfRange,
    InvalidFormat,
    NoActiveProject,
    MissingPrerequisite,
    MalformedPersistedState,
    ExtractionFailed,
    ExtractionCancelled,
    ExportFailed,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyField => "EMPTY_FIELD",
            Self::NotPositive => "NOT_POSITIVE",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::NoActiveProject => "NO_ACTIVE_PROJECT",
            Self::MissingPrerequisite => "MISSING_PREREQUISITE",
            Self::MalformedPersistedState => "MALFORMED_PERSISTED_STATE",
            Self::ExtractionFailed => "EXTRACTION_FAILED",
            Self::ExtractionCancelled => "EXTRACTION_CANCELLED",
            Self::ExportFailed => "EXPORT_FAILED",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code, message and free-form details of a failure.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::NotPositive { .. } => ErrorCode::NotPositive,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::NoActiveProject => ErrorCode::NoActiveProject,
        };
        let domain = DomainError::new(code, err.to_string());
        match err.field() {
            Some(field) => domain.with_detail("field", field),
            None => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::empty_field("object").to_string(),
            "Field 'object' cannot be empty"
        );
        assert_eq!(
            ValidationError::not_positive("quantity", 0.0).to_string(),
            "Field 'quantity' must be greater than zero, got 0"
        );
        assert_eq!(
            ValidationError::invalid_format("code", "expected DD.DD.DDD").to_string(),
            "Field 'code' has invalid format: expected DD.DD.DDD"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::MissingPrerequisite, "DFD required");
        assert_eq!(err.to_string(), "[MISSING_PREREQUISITE] DFD required");
    }

    #[test]
    fn from_validation_keeps_field_detail() {
        let err: DomainError = ValidationError::not_positive("quantity", -1.0).into();
        assert_eq!(err.code, ErrorCode::NotPositive);
        assert_eq!(err.details.get("field").map(String::as_str), Some("quantity"));

        let err: DomainError = ValidationError::NoActiveProject.into();
        assert_eq!(err.code, ErrorCode::NoActiveProject);
        assert!(err.details.is_empty());
    }

    #[test]
    fn codes_are_screaming_snake() {
        assert_eq!(
            ErrorCode::MalformedPersistedState.to_string(),
            "MALFORMED_PERSISTED_STATE"
        );
    }
}
