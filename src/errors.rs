// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for inventory operations

use thiserror::Error;

use crate::domain::ValidationError;

/// Errors raised by the repository and service layers
#[derive(Debug, Error)]
pub enum DcimError {
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness constraint violated
    #[error("Duplicate {entity}: {detail}")]
    Duplicate { entity: &'static str, detail: String },

    /// Field-scoped validation failure
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Value outside its domain (bad parse, bad enum code)
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DcimError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, detail: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            detail: detail.into(),
        }
    }

    /// The validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for inventory operations
pub type DcimResult<T> = Result<T, DcimError>;

impl From<serde_json::Error> for DcimError {
    fn from(err: serde_json::Error) -> Self {
        DcimError::Serialization(err.to_string())
    }
}

impl From<crate::domain::NetworkError> for DcimError {
    fn from(err: crate::domain::NetworkError) -> Self {
        DcimError::InvalidValue(err.to_string())
    }
}

impl From<crate::domain::SlugError> for DcimError {
    fn from(err: crate::domain::SlugError) -> Self {
        DcimError::InvalidValue(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts() {
        let err: DcimError = ValidationError::constraint("face", "required").into();
        assert_eq!(err.as_validation().map(ValidationError::field), Some("face"));
        assert_eq!(err.to_string(), "Validation failed: face: required");
    }

    #[test]
    fn test_not_found_display() {
        let err = DcimError::not_found("rack", "R1");
        assert_eq!(err.to_string(), "rack not found: R1");
        assert!(err.as_validation().is_none());
    }

    #[test]
    fn test_serde_error_converts() {
        let err: DcimError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DcimError::Serialization(_)));
    }
}
