//! # neurostat decode
//!
//! Cross-validated population decoding: classify behavioral event groups
//! (e.g. stimulus left/right) from the spike counts of all clusters in a
//! window around each event.
//!
//! The statistical model is supplied by the caller through [`Classifier`];
//! this crate provides the windowing, cross-validation loop and scoring.
//!
//! ```rust
//! use neurostat_decode::{decode, Classifier, DecodeConfig, KFold, Result};
//!
//! /// Predicts group 1 whenever cluster 0 fired at all
//! struct FiredOrNot;
//!
//! impl Classifier for FiredOrNot {
//!     fn name(&self) -> &str { "fired" }
//!     fn fit(&mut self, _x: &[Vec<f64>], _y: &[usize]) -> Result<()> { Ok(()) }
//!     fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>> {
//!         Ok(x.iter().map(|v| usize::from(v[0] > 0.0)).collect())
//!     }
//!     fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
//!         Ok(self.predict(x)?.into_iter().map(|p| vec![1.0 - p as f64, p as f64]).collect())
//!     }
//! }
//!
//! let spike_times = [1.1, 3.2];
//! let spike_clusters = [0, 0];
//! let event_times = [1.0, 2.0, 3.0, 4.0];
//! let event_groups = [1, 0, 1, 0];
//!
//! let result = decode(
//!     &spike_times,
//!     &spike_clusters,
//!     &event_times,
//!     &event_groups,
//!     &DecodeConfig::default(),
//!     &mut FiredOrNot,
//!     &mut KFold::with_seed(2, 0),
//! )?;
//! assert_eq!(result.accuracy, 1.0);
//! # Ok::<(), neurostat_decode::DecodeError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod cross_validation;
pub mod decoder;
pub mod error;
pub mod metrics;

pub use classifier::Classifier;
pub use cross_validation::{CrossValidator, Fold, KFold, LeaveOneOut};
pub use decoder::{decode, DecodeConfig, DecodeResult};
pub use error::{DecodeError, Result};
