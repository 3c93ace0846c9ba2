//! # Runtime Error Types
//!
//! Error types for configuration loading and bus payload parsing.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Runtime Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Payload      │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  InvalidPayload │  │  Core (catalog)         │ │
//! │  │  ConfigLoad     │  │                 │  │  Validation             │ │
//! │  │  ConfigSave     │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing on the estimate path returns these. Selecting an unknown plan or
//! writing to a missing field degrades silently; errors only surface while
//! the simulator is being configured or when a publisher hands the bus a
//! payload it cannot parse.

use quote_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Runtime error type.
#[derive(Debug, Error)]
pub enum RuntimeError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid simulator configuration.
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Bus Errors
    // =========================================================================
    /// A select-plan payload could not be parsed.
    #[error("Invalid select-plan payload: {0}")]
    InvalidPayload(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Catalog construction failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A configured value broke a domain rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for RuntimeError {
    fn from(err: serde_json::Error) -> Self {
        RuntimeError::InvalidPayload(err.to_string())
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for RuntimeError {
    fn from(err: toml::de::Error) -> Self {
        RuntimeError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for RuntimeError {
    fn from(err: toml::ser::Error) -> Self {
        RuntimeError::ConfigSaveFailed(err.to_string())
    }
}

impl RuntimeError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::InvalidConfig(_)
                | RuntimeError::ConfigLoadFailed(_)
                | RuntimeError::ConfigSaveFailed(_)
                | RuntimeError::Core(_)
                | RuntimeError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        assert!(RuntimeError::InvalidConfig("bad".into()).is_config_error());
        assert!(RuntimeError::Core(CoreError::EmptyCatalog).is_config_error());
        assert!(!RuntimeError::InvalidPayload("{".into()).is_config_error());
    }

    #[test]
    fn test_json_error_maps_to_payload() {
        let err: RuntimeError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, RuntimeError::InvalidPayload(_)));
    }

    #[test]
    fn test_transparent_display() {
        let err = RuntimeError::from(CoreError::DuplicatePlanKey("light".into()));
        assert_eq!(err.to_string(), "Duplicate plan key: light");
    }
}
