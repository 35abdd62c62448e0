//! Windowed population spike counts
//!
//! Counts the spikes of every cluster inside a list of time intervals, e.g.
//! a fixed window around each behavioral event. The resulting matrix is the
//! input to population decoding.

use crate::{
    error::{NeuroError, Result},
    index::ClusterIndex,
    spike::SpikeSlice,
};

/// Spike counts of shape `(n_clusters, n_intervals)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpikeCounts {
    counts: Vec<u32>,
    cluster_ids: Vec<u32>,
    n_intervals: usize,
}

impl SpikeCounts {
    /// Sorted cluster labels, one per row
    pub fn cluster_ids(&self) -> &[u32] {
        &self.cluster_ids
    }

    /// Number of clusters (rows)
    pub fn n_clusters(&self) -> usize {
        self.cluster_ids.len()
    }

    /// Number of intervals (columns)
    pub fn n_intervals(&self) -> usize {
        self.n_intervals
    }

    /// Spikes of dense cluster `row` within interval `interval`
    pub fn get(&self, row: usize, interval: usize) -> u32 {
        assert!(interval < self.n_intervals, "interval {} out of bounds", interval);
        self.counts[row * self.n_intervals + interval]
    }

    /// Counts of one cluster across every interval
    pub fn row(&self, row: usize) -> &[u32] {
        &self.counts[row * self.n_intervals..(row + 1) * self.n_intervals]
    }

    /// Counts of every cluster within one interval
    pub fn column(&self, interval: usize) -> Vec<u32> {
        (0..self.n_clusters()).map(|row| self.get(row, interval)).collect()
    }

    /// One feature vector per interval, ready for a classifier
    pub fn population_vectors(&self) -> Vec<Vec<f64>> {
        (0..self.n_intervals)
            .map(|interval| {
                (0..self.n_clusters())
                    .map(|row| f64::from(self.get(row, interval)))
                    .collect()
            })
            .collect()
    }

    /// Total spikes counted across all intervals
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }
}

/// Count the spikes of each cluster in each half-open interval `[t0, t1)`.
///
/// Every cluster present in `spike_clusters` gets a row, even if it never
/// fires inside any interval. Spike times need not be sorted.
pub fn spike_counts_in_bins(
    spike_times: &[f64],
    spike_clusters: &[u32],
    intervals: &[(f64, f64)],
) -> Result<SpikeCounts> {
    let spikes = SpikeSlice::new(spike_times, spike_clusters)?;

    if intervals
        .iter()
        .any(|&(t0, t1)| t0.is_nan() || t1.is_nan() || t1 < t0)
    {
        return Err(NeuroError::precond("intervals must satisfy t0 <= t1"));
    }

    let index = ClusterIndex::from_labels(spikes.clusters());
    let dense = index.remap(spikes.clusters());
    let n_intervals = intervals.len();
    let mut counts = vec![0u32; index.len() * n_intervals];

    for (col, &(t0, t1)) in intervals.iter().enumerate() {
        for (&t, &row) in spikes.times().iter().zip(&dense) {
            if t0 <= t && t < t1 {
                counts[row * n_intervals + col] += 1;
            }
        }
    }

    Ok(SpikeCounts {
        counts,
        cluster_ids: index.into_clusters(),
        n_intervals,
    })
}
