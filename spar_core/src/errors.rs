//! # Error Types
//!
//! Structured error types for spar_core. Errors carry enough context to be
//! handled programmatically: every variant names the field, file, or
//! calculation that failed and why.
//!
//! Out-of-domain lookups on the empirical material curves are *not* errors;
//! they are modeled by [`crate::curves::OutOfDomain`] and resolved at the
//! rib-verdict level. `SparError` is reserved for conditions that should
//! stop a computation or a file operation outright.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::errors::{SparError, SparResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> SparResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(SparError::invalid_input(
//!             "thickness_mm",
//!             thickness_mm.to_string(),
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spar_core operations
pub type SparResult<T> = Result<T, SparError>;

/// Structured error type for sizing and analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SparError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A rib component required for evaluation has not been supplied
    #[error("Missing component: {component}")]
    MissingComponent { component: String },

    /// Calculation failed (degenerate section, zero load path, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SparError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SparError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingComponent error
    pub fn missing_component(component: impl Into<String>) -> Self {
        SparError::MissingComponent {
            component: component.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SparError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SparError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        SparError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SparError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SparError::InvalidInput { .. } => "INVALID_INPUT",
            SparError::MissingComponent { .. } => "MISSING_COMPONENT",
            SparError::CalculationFailed { .. } => "CALCULATION_FAILED",
            SparError::FileError { .. } => "FILE_ERROR",
            SparError::FileLocked { .. } => "FILE_LOCKED",
            SparError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SparError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SparError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SparError::invalid_input("thickness_mm", "-2.0", "Thickness must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SparError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SparError::missing_component("web").error_code(),
            "MISSING_COMPONENT"
        );
        assert_eq!(
            SparError::calculation_failed("rib", "no load path").error_code(),
            "CALCULATION_FAILED"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(SparError::file_locked("a.spar", "someone", "now").is_recoverable());
        assert!(!SparError::missing_component("web").is_recoverable());
    }
}
