//! Binning parameters for correlograms

use crate::error::{NeuroError, Result};
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest accepted bin or window size, in seconds
pub const MIN_SECONDS: f64 = 1e-5;

/// Largest accepted bin or window size, in seconds
pub const MAX_SECONDS: f64 = 1e5;

/// Lag binning derived from a bin size and a window size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BinningSizes"))]
pub struct BinningParams {
    bin_size: f64,
    window_size: f64,
    winsize_bins: usize,
}

impl BinningParams {
    /// Create binning parameters.
    ///
    /// Both sizes are clamped into `[1e-5, 1e5]` seconds rather than rejected;
    /// only NaN is refused since it has no place in that range.
    pub fn new(bin_size: f64, window_size: f64) -> Result<Self> {
        if bin_size.is_nan() || window_size.is_nan() {
            return Err(NeuroError::precond("bin and window sizes must not be NaN"));
        }

        let bin_size = clamp_seconds("bin_size", bin_size);
        let window_size = clamp_seconds("window_size", window_size);
        let winsize_bins = 2 * (0.5 * window_size / bin_size).floor() as usize + 1;

        Ok(Self {
            bin_size,
            window_size,
            winsize_bins,
        })
    }

    /// Bin width in seconds, after clamping
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Window width in seconds, after clamping
    pub fn window_size(&self) -> f64 {
        self.window_size
    }

    /// Number of lag bins in the full window (always odd)
    pub fn winsize_bins(&self) -> usize {
        self.winsize_bins
    }

    /// Largest lag bin kept on either side of zero
    pub fn half_width(&self) -> usize {
        self.winsize_bins / 2
    }

    /// Round a non-negative time difference to its lag bin.
    ///
    /// Ties round away from zero, so a lag of exactly 2.5 bins lands in bin 3.
    #[inline]
    pub fn lag_bin(&self, diff: f64) -> usize {
        (diff / self.bin_size).round() as usize
    }
}

/// Serialized form accepted when loading `BinningParams`; everything else is
/// rederived by [`BinningParams::new`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BinningSizes {
    bin_size: f64,
    window_size: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<BinningSizes> for BinningParams {
    type Error = NeuroError;

    fn try_from(sizes: BinningSizes) -> Result<Self> {
        Self::new(sizes.bin_size, sizes.window_size)
    }
}

fn clamp_seconds(name: &str, value: f64) -> f64 {
    let clamped = value.clamp(MIN_SECONDS, MAX_SECONDS);
    if clamped != value {
        warn!("{} = {} s clamped to {} s", name, value, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winsize_bins() {
        let params = BinningParams::new(0.5, 2.0).unwrap();
        assert_eq!(params.winsize_bins(), 5);
        assert_eq!(params.half_width(), 2);

        // Window not a multiple of two bins rounds down to an odd count
        let params = BinningParams::new(0.25, 1.4).unwrap();
        assert_eq!(params.winsize_bins(), 5);
    }

    #[test]
    fn test_tiny_window_single_bin() {
        let params = BinningParams::new(1.0, 0.5).unwrap();
        assert_eq!(params.winsize_bins(), 1);
        assert_eq!(params.half_width(), 0);
    }

    #[test]
    fn test_out_of_range_is_clamped_not_rejected() {
        let params = BinningParams::new(0.0, -3.0).unwrap();
        assert_eq!(params.bin_size(), MIN_SECONDS);
        assert_eq!(params.window_size(), MIN_SECONDS);
        assert_eq!(params.winsize_bins(), 1);

        let params = BinningParams::new(f64::INFINITY, 1e9).unwrap();
        assert_eq!(params.bin_size(), MAX_SECONDS);
        assert_eq!(params.window_size(), MAX_SECONDS);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(BinningParams::new(f64::NAN, 1.0).is_err());
        assert!(BinningParams::new(0.001, f64::NAN).is_err());
    }

    #[test]
    fn test_lag_bin_rounding() {
        let params = BinningParams::new(0.5, 2.0).unwrap();
        assert_eq!(params.lag_bin(0.0), 0);
        assert_eq!(params.lag_bin(0.24), 0);
        assert_eq!(params.lag_bin(0.25), 1);
        assert_eq!(params.lag_bin(1.24), 2);
        assert_eq!(params.lag_bin(1.25), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rederives_bins() {
        let json = r#"{"bin_size": 0.0, "window_size": 2.0, "winsize_bins": 4}"#;
        let params: BinningParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.bin_size(), MIN_SECONDS);
        assert_eq!(params.winsize_bins() % 2, 1);
        assert_eq!(params, BinningParams::new(0.0, 2.0).unwrap());

        let saved = serde_json::to_string(&BinningParams::new(0.5, 2.0).unwrap()).unwrap();
        let loaded: BinningParams = serde_json::from_str(&saved).unwrap();
        assert_eq!(loaded.winsize_bins(), 5);
    }
}
