//! Reconstruction of the full lag axis from a half correlogram

use super::tensor::CountTensor;

/// Expand a half tensor (lags `0..=hw`, source spike first) into the full
/// tensor (lags `-hw..=hw`, centre at index `hw`).
///
/// A pair counted from `i` to `j` at lag `k` is the same pair seen from `j`
/// to `i` at lag `-k`, so the negative side of `[i][j]` is `[j][i]` reversed.
/// Simultaneous spikes are attributed to whichever came first in the input;
/// the zero-lag cell takes the larger of the two orientations so the result
/// does not depend on that order.
pub fn symmetrize(mut half: CountTensor) -> CountTensor {
    let (n_clusters, _, half_bins) = half.shape();
    debug_assert!(half_bins > 0);
    let hw = half_bins - 1;

    for i in 0..n_clusters {
        for j in (i + 1)..n_clusters {
            let zero = half.get(i, j, 0).max(half.get(j, i, 0));
            half.set(i, j, 0, zero);
            half.set(j, i, 0, zero);
        }
    }

    let mut full = CountTensor::zeros(n_clusters, 2 * hw + 1);
    for i in 0..n_clusters {
        for j in 0..n_clusters {
            let mirrored = half.pair(j, i);
            let dst = full.pair_mut(i, j);
            for k in 1..=hw {
                dst[hw - k] = mirrored[k];
            }
            dst[hw..].copy_from_slice(half.pair(i, j));
        }
    }

    full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_lags_mirror_transpose() {
        let mut half = CountTensor::zeros(2, 3);
        half.set(0, 1, 1, 4);
        half.set(0, 1, 2, 7);
        half.set(1, 0, 2, 1);

        let full = symmetrize(half);
        assert_eq!(full.shape(), (2, 2, 5));
        assert_eq!(full.pair(0, 1), &[1, 0, 0, 4, 7]);
        assert_eq!(full.pair(1, 0), &[7, 4, 0, 0, 1]);
    }

    #[test]
    fn test_zero_lag_takes_max() {
        let mut half = CountTensor::zeros(2, 2);
        half.set(0, 1, 0, 3);
        half.set(1, 0, 0, 1);
        half.set(1, 1, 0, 2);

        let full = symmetrize(half);
        assert_eq!(full.get(0, 1, 1), 3);
        assert_eq!(full.get(1, 0, 1), 3);
        // Diagonal is left alone
        assert_eq!(full.get(1, 1, 1), 2);
    }

    #[test]
    fn test_single_bin() {
        let mut half = CountTensor::zeros(1, 1);
        half.set(0, 0, 0, 6);
        let full = symmetrize(half);
        assert_eq!(full.shape(), (1, 1, 1));
        assert_eq!(full.get(0, 0, 0), 6);
    }

    #[test]
    fn test_symmetry_property() {
        let mut half = CountTensor::zeros(3, 4);
        let mut value = 0;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..4 {
                    value = (value * 7 + 3) % 11;
                    half.set(i, j, k, value);
                }
            }
        }

        let full = symmetrize(half);
        let c = 3;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..=3 {
                    assert_eq!(full.get(i, j, c + k), full.get(j, i, c - k));
                }
            }
        }
    }
}
