//! Pluggable classifier interface
//!
//! The decoder only orchestrates training and prediction; the statistical
//! model itself lives behind [`Classifier`].

use crate::error::Result;

/// A supervised classifier over dense feature vectors.
///
/// Labels are dense group indices `0..n_groups`. Probability rows are indexed
/// by label; a label the classifier never saw during `fit` may be missing from
/// the end of a row and is then treated as probability zero.
pub trait Classifier {
    /// Short name reported in decoding results
    fn name(&self) -> &str;

    /// Train on one feature vector per sample
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<()>;

    /// Predict a label for every feature vector
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// Per-label probabilities for every feature vector
    fn predict_proba(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;
}
