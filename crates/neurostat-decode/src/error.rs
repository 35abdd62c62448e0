//! Error handling for population decoding

use neurostat_core::NeuroError;
use thiserror::Error;

/// Result type for decoding operations
pub type Result<T> = core::result::Result<T, DecodeError>;

/// Errors raised while decoding event groups from spike counts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Invalid spike data, event data or parameters
    #[error(transparent)]
    Input(#[from] NeuroError),

    /// The pluggable classifier reported a failure
    #[error("Classifier error: {0}")]
    Classifier(String),
}

impl DecodeError {
    /// Create a classifier error
    pub fn classifier(reason: impl Into<String>) -> Self {
        Self::Classifier(reason.into())
    }
}
