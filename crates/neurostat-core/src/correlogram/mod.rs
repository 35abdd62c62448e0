//! Pairwise spike-train cross-correlograms
//!
//! For every ordered pair of clusters, a histogram of the time lags between
//! their spikes within a bounded window. The pipeline is:
//!
//! 1. [`ClusterIndex`] maps cluster labels to dense rows;
//! 2. [`ShiftScan`] bins every spike pair with a non-negative lag inside the
//!    window into a half tensor, without enumerating all pairs;
//! 3. [`symmetrize`] mirrors the half tensor onto negative lags.
//!
//! ```rust
//! use neurostat_core::correlogram::compute_cross_correlograms;
//!
//! let times = [0.010, 0.012, 0.020, 0.021];
//! let clusters = [4, 9, 4, 9];
//! let ccg = compute_cross_correlograms(&times, &clusters, 0.001, 0.01).unwrap();
//!
//! assert_eq!(ccg.clusters(), &[4, 9]);
//! // Cluster 9 fires 1 ms and 2 ms after cluster 4
//! assert_eq!(ccg.at_lag(0, 1, 1), Some(1));
//! assert_eq!(ccg.at_lag(0, 1, 2), Some(1));
//! ```

pub mod params;
pub mod scan;
pub mod symmetrize;
pub mod tensor;

pub use params::BinningParams;
pub use scan::{ScanTrace, ShiftScan};
pub use symmetrize::symmetrize;
pub use tensor::CountTensor;

use crate::{error::Result, index::ClusterIndex, spike::SpikeSlice};
use core::fmt;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full cross-correlograms of every cluster pair
#[derive(Debug, Clone, PartialEq)]
pub struct Correlograms {
    tensor: CountTensor,
    clusters: Vec<u32>,
    params: BinningParams,
}

impl Correlograms {
    /// Full tensor, lag axis of length `winsize_bins`
    pub fn tensor(&self) -> &CountTensor {
        &self.tensor
    }

    /// Sorted cluster labels; row `i` of the tensor is `clusters()[i]`
    pub fn clusters(&self) -> &[u32] {
        &self.clusters
    }

    /// Binning used, after clamping
    pub fn params(&self) -> &BinningParams {
        &self.params
    }

    /// Number of clusters
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Index of the zero-lag bin
    pub fn center(&self) -> usize {
        self.params.half_width()
    }

    /// Count at `[i][j][k]` in dense indices
    pub fn get(&self, i: usize, j: usize, k: usize) -> i32 {
        self.tensor.get(i, j, k)
    }

    /// Correlogram of dense cluster `j` relative to dense cluster `i`
    pub fn pair(&self, i: usize, j: usize) -> &[i32] {
        self.tensor.pair(i, j)
    }

    /// Count at a signed lag in bins, `None` outside the window
    pub fn at_lag(&self, i: usize, j: usize, lag: isize) -> Option<i32> {
        let k = self.center().checked_add_signed(lag)?;
        self.pair(i, j).get(k).copied()
    }

    /// Correlogram between two clusters addressed by their original labels
    pub fn by_label(&self, source: u32, target: u32) -> Option<&[i32]> {
        let i = self.clusters.binary_search(&source).ok()?;
        let j = self.clusters.binary_search(&target).ok()?;
        Some(self.pair(i, j))
    }

    /// Lag of every bin centre, in seconds
    pub fn lag_times(&self) -> Vec<f64> {
        let center = self.center() as f64;
        (0..self.params.winsize_bins())
            .map(|k| (k as f64 - center) * self.params.bin_size())
            .collect()
    }

    /// Split into the tensor and the sorted cluster labels
    pub fn into_parts(self) -> (CountTensor, Vec<u32>) {
        (self.tensor, self.clusters)
    }
}

impl fmt::Display for Correlograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Correlograms({} clusters, {} bins of {} s)",
            self.n_clusters(),
            self.params.winsize_bins(),
            self.params.bin_size()
        )
    }
}

/// Compute all pairwise cross-correlograms among the clusters present in
/// `spike_clusters`.
///
/// `spike_times` must be non-decreasing. `bin_size` and `window_size` are in
/// seconds and are clamped into `[1e-5, 1e5]`. Empty input yields an empty
/// result.
pub fn compute_cross_correlograms(
    spike_times: &[f64],
    spike_clusters: &[u32],
    bin_size: f64,
    window_size: f64,
) -> Result<Correlograms> {
    let spikes = SpikeSlice::sorted(spike_times, spike_clusters)?;
    let params = BinningParams::new(bin_size, window_size)?;

    let index = ClusterIndex::from_labels(spikes.clusters());
    let dense = index.remap(spikes.clusters());

    let (half, trace) = scan::accumulate(spikes.times(), &dense, index.len(), &params);
    debug!(
        "correlograms: {} spikes, {} clusters, {} bins, {} pairs over {} shifts",
        spikes.len(),
        index.len(),
        params.winsize_bins(),
        trace.pairs_counted(),
        trace.shifts()
    );

    Ok(Correlograms {
        tensor: symmetrize(half),
        clusters: index.into_clusters(),
        params,
    })
}

/// Reusable correlogram settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CorrelogramConfig {
    /// Bin width in seconds
    pub bin_size: f64,
    /// Full window width in seconds
    pub window_size: f64,
}

impl Default for CorrelogramConfig {
    fn default() -> Self {
        Self {
            bin_size: 0.001,
            window_size: 0.05,
        }
    }
}

impl CorrelogramConfig {
    /// Compute correlograms with these settings
    pub fn compute(&self, spike_times: &[f64], spike_clusters: &[u32]) -> Result<Correlograms> {
        compute_cross_correlograms(spike_times, spike_clusters, self.bin_size, self.window_size)
    }
}
