//! Train/test splitters for cross-validated decoding

use crate::error::Result;
use neurostat_core::NeuroError;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One train/test partition of sample indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Samples used for fitting, ascending
    pub train: Vec<usize>,
    /// Samples held out for prediction, ascending
    pub test: Vec<usize>,
}

/// Produces the folds of one cross-validation pass
pub trait CrossValidator {
    /// Partition `0..n_samples` into folds whose test sets cover every sample
    /// exactly once
    fn split(&mut self, n_samples: usize) -> Result<Vec<Fold>>;

    /// Human-readable scheme, e.g. `5-fold`
    fn describe(&self) -> String;

    /// Whether repeating the pass can give different folds
    fn repeatable(&self) -> bool {
        true
    }
}

/// K contiguous folds, optionally over shuffled samples
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    rng: ChaCha8Rng,
}

impl KFold {
    /// Shuffled k-fold with an entropy-seeded generator
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: true,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Shuffled k-fold with a fixed seed
    pub fn with_seed(n_splits: usize, seed: u64) -> Self {
        Self {
            n_splits,
            shuffle: true,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Enable or disable shuffling before splitting
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Number of folds
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }
}

impl CrossValidator for KFold {
    fn split(&mut self, n_samples: usize) -> Result<Vec<Fold>> {
        if self.n_splits < 2 {
            return Err(NeuroError::out_of_range(
                "n_splits",
                self.n_splits as f64,
                "k-fold needs at least 2 splits",
            )
            .into());
        }
        if self.n_splits > n_samples {
            return Err(NeuroError::out_of_range(
                "n_splits",
                self.n_splits as f64,
                "more splits than samples",
            )
            .into());
        }

        let mut order: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }

        // The first `n % k` folds take one extra sample
        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for k in 0..self.n_splits {
            let size = base + usize::from(k < extra);
            let mut test = order[start..start + size].to_vec();
            test.sort_unstable();

            let mut in_test = vec![false; n_samples];
            for &i in &test {
                in_test[i] = true;
            }
            let train = (0..n_samples).filter(|&i| !in_test[i]).collect();

            folds.push(Fold { train, test });
            start += size;
        }

        Ok(folds)
    }

    fn describe(&self) -> String {
        format!("{}-fold", self.n_splits)
    }
}

/// One fold per sample, each holding out a single sample
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveOneOut;

impl CrossValidator for LeaveOneOut {
    fn split(&mut self, n_samples: usize) -> Result<Vec<Fold>> {
        if n_samples < 2 {
            return Err(NeuroError::out_of_range(
                "n_samples",
                n_samples as f64,
                "leave-one-out needs at least 2 samples",
            )
            .into());
        }

        Ok((0..n_samples)
            .map(|i| Fold {
                train: (0..n_samples).filter(|&j| j != i).collect(),
                test: vec![i],
            })
            .collect())
    }

    fn describe(&self) -> String {
        "leave-one-out".to_string()
    }

    fn repeatable(&self) -> bool {
        false
    }
}
