//! Error types for spike statistics
//!
//! Every failure here is a caller error in input shape or ordering. Nothing is
//! retried; the call that detects the problem returns immediately.

use thiserror::Error;

/// Result type alias for neurostat operations
pub type Result<T> = core::result::Result<T, NeuroError>;

/// Main error type for neurostat operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeuroError {
    /// An input precondition was broken (unsorted spike times, NaN values)
    #[error("Precondition violated: {reason}")]
    PrecondViolation {
        /// Description of the broken precondition
        reason: &'static str,
    },

    /// Two parallel inputs disagree in length
    #[error("Shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Which input pair disagreed
        what: &'static str,
        /// Length of the reference input
        expected: usize,
        /// Length of the offending input
        got: usize,
    },

    /// A numeric parameter lies outside its accepted range.
    ///
    /// Binning parameters never produce this: they are clamped instead.
    #[error("Parameter {name} out of range ({value}): {reason}")]
    ParameterOutOfRange {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// What the accepted range is
        reason: &'static str,
    },
}

impl NeuroError {
    /// Create a precondition violation
    pub fn precond(reason: &'static str) -> Self {
        Self::PrecondViolation { reason }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { what, expected, got }
    }

    /// Create a parameter range error
    pub fn out_of_range(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::ParameterOutOfRange { name, value, reason }
    }

    /// Whether this error was caused by the ordering or content of the input
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::PrecondViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = NeuroError::shape_mismatch("spike_clusters", 4, 3);
        assert_eq!(
            format!("{}", error),
            "Shape mismatch for spike_clusters: expected 4, got 3"
        );

        let error = NeuroError::precond("spike times must be increasing");
        assert!(format!("{}", error).contains("increasing"));
        assert!(error.is_precondition());
    }

    #[test]
    fn test_error_equality() {
        let error1 = NeuroError::precond("test");
        let error2 = NeuroError::precond("test");
        let error3 = NeuroError::precond("different");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_out_of_range() {
        let error = NeuroError::out_of_range("n_splits", 1.0, "at least 2 folds");
        let msg = format!("{}", error);
        assert!(msg.contains("n_splits"));
        assert!(msg.contains("at least 2 folds"));
        assert!(!error.is_precondition());
    }
}
