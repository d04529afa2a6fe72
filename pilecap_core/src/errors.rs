//! # Error Types
//!
//! Structured error types for pilecap_core. Every failure is an input or
//! configuration problem reported at the boundary of the component that
//! detected it; the calculations are deterministic, so retrying with the same
//! input can never succeed.
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length".to_string(),
//!             value: length_m.to_string(),
//!             reason: "Pile length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pilecap_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive geometry, negative speed, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The SPT profile does not reach the pile tip
    #[error("Insufficient profile depth: soundings reach {profile_depth} m but the pile is {pile_length} m long")]
    InsufficientProfileDepth { profile_depth: f64, pile_length: f64 },

    /// No empirical coefficient is available for an installation method
    #[error("Unknown installation method: {method}")]
    UnknownMethod { method: String },

    /// No empirical coefficient is available for a soil class
    #[error("Unknown soil type: {soil}")]
    UnknownSoilType { soil: String },

    /// An adopted dimension is below the computed minimum
    #[error("Adopted {dimension} {adopted:.3} m is below the required minimum {minimum:.3} m")]
    ConfigurationBelowMinimum {
        dimension: String,
        adopted: f64,
        minimum: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InsufficientProfileDepth error
    pub fn insufficient_depth(profile_depth: f64, pile_length: f64) -> Self {
        CalcError::InsufficientProfileDepth {
            profile_depth,
            pile_length,
        }
    }

    /// Create an UnknownMethod error
    pub fn unknown_method(method: impl Into<String>) -> Self {
        CalcError::UnknownMethod {
            method: method.into(),
        }
    }

    /// Create an UnknownSoilType error
    pub fn unknown_soil(soil: impl Into<String>) -> Self {
        CalcError::UnknownSoilType { soil: soil.into() }
    }

    /// Create a ConfigurationBelowMinimum error
    pub fn below_minimum(dimension: impl Into<String>, adopted: f64, minimum: f64) -> Self {
        CalcError::ConfigurationBelowMinimum {
            dimension: dimension.into(),
            adopted,
            minimum,
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Reject values that are not finite and strictly positive
    pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
        }
        Ok(())
    }

    /// Reject values that are not finite or are negative
    pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
        }
        Ok(())
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InsufficientProfileDepth { .. } => "INSUFFICIENT_PROFILE_DEPTH",
            CalcError::UnknownMethod { .. } => "UNKNOWN_METHOD",
            CalcError::UnknownSoilType { .. } => "UNKNOWN_SOIL_TYPE",
            CalcError::ConfigurationBelowMinimum { .. } => "CONFIGURATION_BELOW_MINIMUM",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::insufficient_depth(14.0, 15.0);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InsufficientProfileDepth"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_method("Franki").error_code(), "UNKNOWN_METHOD");
        assert_eq!(CalcError::unknown_soil("Peat").error_code(), "UNKNOWN_SOIL_TYPE");
        assert_eq!(
            CalcError::below_minimum("width", 3.0, 3.43).error_code(),
            "CONFIGURATION_BELOW_MINIMUM"
        );
    }

    #[test]
    fn test_below_minimum_message() {
        let error = CalcError::below_minimum("width", 3.0, 3.4303);
        assert_eq!(
            error.to_string(),
            "Adopted width 3.000 m is below the required minimum 3.430 m"
        );
    }

    #[test]
    fn test_positive_guards() {
        assert!(CalcError::require_positive("diameter", 0.4).is_ok());
        assert!(CalcError::require_positive("diameter", 0.0).is_err());
        assert!(CalcError::require_positive("diameter", f64::NAN).is_err());
        assert!(CalcError::require_non_negative("tension", 0.0).is_ok());
        assert!(CalcError::require_non_negative("tension", -1.0).is_err());
    }
}
