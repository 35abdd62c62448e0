//! Spike input validation
//!
//! Spike data arrives as two parallel slices: times in seconds and the cluster
//! label of every spike. [`SpikeSlice`] checks the shape and ordering once so
//! the analysis routines can index freely afterwards.

use crate::error::{NeuroError, Result};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cluster label as produced by spike sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterId(pub u32);

impl ClusterId {
    /// Create a new cluster ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw label
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

impl From<u32> for ClusterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ClusterId> for u32 {
    fn from(id: ClusterId) -> Self {
        id.0
    }
}

/// Borrowed view over parallel spike time / cluster slices
#[derive(Debug, Clone, Copy)]
pub struct SpikeSlice<'a> {
    times: &'a [f64],
    clusters: &'a [u32],
}

impl<'a> SpikeSlice<'a> {
    /// Wrap parallel slices, checking only that their lengths agree
    pub fn new(times: &'a [f64], clusters: &'a [u32]) -> Result<Self> {
        if times.len() != clusters.len() {
            return Err(NeuroError::shape_mismatch(
                "spike_clusters",
                times.len(),
                clusters.len(),
            ));
        }

        Ok(Self { times, clusters })
    }

    /// Wrap parallel slices whose times must be non-decreasing
    pub fn sorted(times: &'a [f64], clusters: &'a [u32]) -> Result<Self> {
        let spikes = Self::new(times, clusters)?;

        if times.iter().any(|t| t.is_nan()) {
            return Err(NeuroError::precond("spike times must not be NaN"));
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(NeuroError::precond("spike times must be increasing"));
        }

        Ok(spikes)
    }

    /// Spike times in seconds
    pub fn times(&self) -> &'a [f64] {
        self.times
    }

    /// Cluster label per spike
    pub fn clusters(&self) -> &'a [u32] {
        self.clusters
    }

    /// Number of spikes
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Check if there are no spikes
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time span covered by the spikes, `None` when empty
    pub fn span(&self) -> Option<(f64, f64)> {
        let first = *self.times.first()?;
        let last = *self.times.last()?;
        Some((first, last))
    }

    /// Iterate `(time, cluster)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, ClusterId)> + 'a {
        self.times
            .iter()
            .copied()
            .zip(self.clusters.iter().map(|&c| ClusterId(c)))
    }
}

impl fmt::Display for SpikeSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span() {
            Some((t0, t1)) => write!(f, "Spikes({} over {:.3}..{:.3} s)", self.len(), t0, t1),
            None => write!(f, "Spikes(empty)"),
        }
    }
}
