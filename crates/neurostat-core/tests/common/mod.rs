//! Shared helpers for neurostat-core integration tests

#![allow(dead_code)]

use neurostat_core::CountTensor;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sorted random spike train: `(times, clusters)`.
///
/// Each cluster fires as a Poisson process of the given rate (Hz) over
/// `duration` seconds; labels are taken from `labels`.
pub fn poisson_spikes(
    labels: &[u32],
    rates: &[f64],
    duration: f64,
    seed: u64,
) -> (Vec<f64>, Vec<u32>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut spikes: Vec<(f64, u32)> = Vec::new();

    for (&label, &rate) in labels.iter().zip(rates) {
        let mut time = 0.0;
        loop {
            time += -(1.0 - rng.gen::<f64>()).ln() / rate;
            if time >= duration {
                break;
            }
            spikes.push((time, label));
        }
    }

    spikes.sort_by(|a, b| a.0.total_cmp(&b.0));
    spikes.into_iter().unzip()
}

/// Sorted spike train of exactly `n` spikes with times quantised to a grid of
/// `step` seconds, so that coincident spikes and exact bin edges occur.
pub fn grid_spikes(
    n: usize,
    n_clusters: u32,
    step: f64,
    max_steps: u32,
    seed: u64,
) -> (Vec<f64>, Vec<u32>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut spikes: Vec<(f64, u32)> = (0..n)
        .map(|_| {
            let time = f64::from(rng.gen_range(0..max_steps)) * step;
            (time, rng.gen_range(0..n_clusters) * 3 + 1)
        })
        .collect();

    spikes.sort_by(|a, b| a.0.total_cmp(&b.0));
    spikes.into_iter().unzip()
}

/// O(N²) reference: enumerate every pair of spikes `a < b` (by position),
/// bin `t[b] - t[a]`, and record it at `+lag` for `(a, b)` and `-lag` for
/// `(b, a)`. Zero-lag cells take the larger of the two orientations.
pub fn brute_force(
    times: &[f64],
    clusters: &[u32],
    bin_size: f64,
    winsize_bins: usize,
) -> (CountTensor, Vec<u32>) {
    let mut labels: Vec<u32> = clusters.to_vec();
    labels.sort_unstable();
    labels.dedup();

    let n_clusters = labels.len();
    let dense: Vec<usize> = clusters
        .iter()
        .map(|c| labels.binary_search(c).unwrap())
        .collect();

    let hw = winsize_bins / 2;
    let mut full = CountTensor::zeros(n_clusters, winsize_bins);
    let mut zero = vec![0i32; n_clusters * n_clusters];

    for a in 0..times.len() {
        for b in (a + 1)..times.len() {
            let lag = ((times[b] - times[a]) / bin_size).round() as usize;
            if lag > hw {
                continue;
            }
            let (i, j) = (dense[a], dense[b]);
            if lag == 0 {
                zero[i * n_clusters + j] += 1;
            } else {
                let forward = full.get(i, j, hw + lag);
                full.set(i, j, hw + lag, forward + 1);
                let backward = full.get(j, i, hw - lag);
                full.set(j, i, hw - lag, backward + 1);
            }
        }
    }

    for i in 0..n_clusters {
        for j in 0..n_clusters {
            let value = if i == j {
                zero[i * n_clusters + i]
            } else {
                zero[i * n_clusters + j].max(zero[j * n_clusters + i])
            };
            full.set(i, j, hw, value);
        }
    }

    (full, labels)
}

/// Number of position pairs `a < b` whose lag rounds into `0..=hw`
pub fn brute_force_pair_count(times: &[f64], bin_size: f64, hw: usize) -> u64 {
    let mut count = 0;
    for a in 0..times.len() {
        for b in (a + 1)..times.len() {
            if ((times[b] - times[a]) / bin_size).round() as usize <= hw {
                count += 1;
            }
        }
    }
    count
}

/// Assert `full[i][j][c + k] == full[j][i][c - k]` for every cell
pub fn assert_symmetric(tensor: &CountTensor) {
    let (n, _, bins) = tensor.shape();
    let c = bins / 2;
    for i in 0..n {
        for j in 0..n {
            for k in 0..=c {
                assert_eq!(
                    tensor.get(i, j, c + k),
                    tensor.get(j, i, c - k),
                    "asymmetry at ({}, {}, lag {})",
                    i,
                    j,
                    k
                );
            }
        }
    }
}
