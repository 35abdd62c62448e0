//! Shift-scan accumulation of spike-pair lags
//!
//! Rather than enumerating every spike pair, the scan compares the sorted
//! spike train against copies of itself shifted by `1, 2, 3, …` positions.
//! For a fixed source spike the time difference to the spike `s` positions
//! later only grows with `s`, so once a source position falls outside the
//! window it is retired for good. The scan ends when every position is
//! retired, which costs `O(N · S)` where `S` is the largest number of spikes
//! inside one window.

use super::{params::BinningParams, tensor::CountTensor};
use core::ops::Range;
use log::trace;

/// Per-shift bookkeeping of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanTrace {
    /// Number of source positions that produced a count at each shift,
    /// starting with shift 1
    pub active_per_shift: Vec<usize>,
}

impl ScanTrace {
    /// Number of shifts that counted at least one pair
    pub fn shifts(&self) -> usize {
        self.active_per_shift.len()
    }

    /// Number of spike pairs counted over all shifts
    pub fn pairs_counted(&self) -> u64 {
        self.active_per_shift.iter().map(|&n| n as u64).sum()
    }

    /// Fold the trace of a disjoint set of source positions into this one
    pub fn merge(&mut self, other: &ScanTrace) {
        if other.active_per_shift.len() > self.active_per_shift.len() {
            self.active_per_shift.resize(other.active_per_shift.len(), 0);
        }
        for (dst, src) in self.active_per_shift.iter_mut().zip(&other.active_per_shift) {
            *dst += src;
        }
    }
}

/// Shift-scan over sorted spike times with dense cluster indices
#[derive(Debug, Clone, Copy)]
pub struct ShiftScan<'a> {
    times: &'a [f64],
    dense: &'a [usize],
    n_clusters: usize,
    params: &'a BinningParams,
}

impl<'a> ShiftScan<'a> {
    /// Prepare a scan. `times` must be sorted and `dense` hold one index in
    /// `0..n_clusters` per spike.
    pub fn new(
        times: &'a [f64],
        dense: &'a [usize],
        n_clusters: usize,
        params: &'a BinningParams,
    ) -> Self {
        debug_assert_eq!(times.len(), dense.len());
        Self {
            times,
            dense,
            n_clusters,
            params,
        }
    }

    /// Scan every spike, producing the half tensor (lags `0..=half_width`)
    pub fn run(&self) -> (CountTensor, ScanTrace) {
        self.run_range(0..self.times.len())
    }

    /// Scan pairs whose earlier spike lies in `sources`.
    ///
    /// Later spikes are taken from the whole train, so disjoint source ranges
    /// partition the pairs exactly and their tensors can be summed.
    pub fn run_range(&self, sources: Range<usize>) -> (CountTensor, ScanTrace) {
        let n = self.times.len();
        let half_width = self.params.half_width();
        let mut half = CountTensor::zeros(self.n_clusters, half_width + 1);
        let mut trace = ScanTrace::default();

        // Still-active source positions, kept in ascending order
        let mut active: Vec<usize> = (sources.start..sources.end.min(n)).collect();
        let mut shift = 1;

        while !active.is_empty() {
            let mut kept = 0;
            for k in 0..active.len() {
                let i = active[k];
                let j = i + shift;
                if j >= n {
                    // Everything after this position also runs off the end
                    break;
                }

                let lag = self.params.lag_bin(self.times[j] - self.times[i]);
                if lag > half_width {
                    continue;
                }

                half.increment(self.dense[i], self.dense[j], lag);
                active[kept] = i;
                kept += 1;
            }
            active.truncate(kept);

            if kept > 0 {
                trace!("shift {}: {} active positions", shift, kept);
                trace.active_per_shift.push(kept);
            }
            shift += 1;
        }

        (half, trace)
    }
}

/// Run the scan over all spikes, split across rayon workers when the
/// `parallel` feature is on.
pub fn accumulate(
    times: &[f64],
    dense: &[usize],
    n_clusters: usize,
    params: &BinningParams,
) -> (CountTensor, ScanTrace) {
    let scan = ShiftScan::new(times, dense, n_clusters, params);

    #[cfg(feature = "parallel")]
    {
        parallel::run_chunked(&scan, times.len())
    }

    #[cfg(not(feature = "parallel"))]
    {
        scan.run()
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::{CountTensor, ScanTrace, ShiftScan};
    use rayon::prelude::*;

    const MIN_CHUNK: usize = 4096;

    /// Scan contiguous chunks of source positions on the rayon pool, each
    /// into its own partial tensor, then sum the partials.
    pub(super) fn run_chunked(scan: &ShiftScan<'_>, n: usize) -> (CountTensor, ScanTrace) {
        let chunk = (n / (rayon::current_num_threads() * 4)).max(MIN_CHUNK);
        let n_chunks = n.div_ceil(chunk);
        let n_bins = scan.params.half_width() + 1;

        (0..n_chunks)
            .into_par_iter()
            .map(|c| scan.run_range(c * chunk..((c + 1) * chunk).min(n)))
            .reduce(
                || (CountTensor::zeros(scan.n_clusters, n_bins), ScanTrace::default()),
                |(mut tensor, mut trace), (other_tensor, other_trace)| {
                    tensor.merge(&other_tensor);
                    trace.merge(&other_trace);
                    (tensor, trace)
                },
            )
    }
}
