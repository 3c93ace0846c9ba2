//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog construction failures                  │
//! │  └── ValidationError  - Field-level rule violations                    │
//! │                                                                         │
//! │  quote-runtime errors (separate crate)                                 │
//! │  └── RuntimeError     - Config, payload and I/O failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RuntimeError → CLI (anyhow)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Errors Are NOT Used
//! Estimate mutations never fail. Unknown plan keys are no-ops, unknown
//! option keys cost nothing and page counts are clamped. Errors only exist
//! where a catalog or configuration is being built.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog construction errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog must contain at least one plan.
    #[error("Catalog must contain at least one plan")]
    EmptyCatalog,

    /// Two plans share the same key.
    #[error("Duplicate plan key: {0}")]
    DuplicatePlanKey(String),

    /// Two options share the same key.
    #[error("Duplicate option key: {0}")]
    DuplicateAddOnKey(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicatePlanKey("light".to_string());
        assert_eq!(err.to_string(), "Duplicate plan key: light");

        assert_eq!(
            CoreError::EmptyCatalog.to_string(),
            "Catalog must contain at least one plan"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "plan key".to_string(),
        };
        assert_eq!(err.to_string(), "plan key is required");

        let err = ValidationError::OutOfRange {
            field: "pages".to_string(),
            min: 1,
            max: 30,
        };
        assert_eq!(err.to_string(), "pages must be between 1 and 30");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "included pages".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
