//! Error types for clt-darts.
//!
//! Every fallible operation returns `Result<T, CltError>` instead of
//! panicking. A failure is fatal to the current run: no partial
//! animation is ever handed to the renderer.

use thiserror::Error;

/// Result type alias for clt-darts operations.
pub type CltResult<T> = Result<T, CltError>;

/// Unified error type for all clt-darts operations.
#[derive(Debug, Error)]
pub enum CltError {
    // ===== Invariant Violations =====
    /// The flat sample buffer cannot be partitioned into whole days.
    #[error("Shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        /// Required sample count (`total_days × darts_per_day`).
        expected: usize,
        /// Sample count actually supplied.
        actual: usize,
    },

    /// Numerical instability detected (NaN or Inf).
    #[error("Non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CltError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(location: impl Into<String>) -> Self {
        Self::NonFiniteValue {
            location: location.into(),
        }
    }

    /// Check if this error is an internal invariant violation rather than
    /// bad user input.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. } | Self::NonFiniteValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_detection() {
        let shape = CltError::ShapeMismatch {
            expected: 20,
            actual: 19,
        };
        assert!(shape.is_invariant_violation());

        let non_finite = CltError::non_finite("x_mean[3]");
        assert!(non_finite.is_invariant_violation());

        let config = CltError::config("invalid");
        assert!(!config.is_invariant_violation());
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = CltError::ShapeMismatch {
            expected: 20_000,
            actual: 19_999,
        };
        let msg = err.to_string();
        assert!(msg.contains("Shape mismatch"));
        assert!(msg.contains("20000"));
        assert!(msg.contains("19999"));
    }

    #[test]
    fn test_error_config() {
        let err = CltError::config("darts_per_day must be at least 1");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("darts_per_day"));
    }

    #[test]
    fn test_error_serialization() {
        let err = CltError::serialization("failed to serialize");
        assert!(!err.is_invariant_violation());
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_io() {
        let err = CltError::io("file not found");
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CltError = io.into();
        assert!(matches!(err, CltError::Io(_)));
    }

    #[test]
    fn test_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let err: CltError = yaml_err.into();
        assert!(err.to_string().contains("YAML parsing error"));
    }

    #[test]
    fn test_error_non_finite_display() {
        let err = CltError::non_finite("curve.density");
        let msg = err.to_string();
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("curve.density"));
    }
}
