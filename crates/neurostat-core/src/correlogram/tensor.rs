//! Dense 3-D count storage for correlograms

use core::fmt;

/// Counts indexed `[source cluster][target cluster][lag bin]`.
///
/// Stored row-major in a single allocation so that one cluster pair's
/// histogram is a contiguous slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTensor {
    data: Vec<i32>,
    n_clusters: usize,
    n_bins: usize,
}

impl CountTensor {
    /// Zero-initialised tensor of shape `(n_clusters, n_clusters, n_bins)`
    pub fn zeros(n_clusters: usize, n_bins: usize) -> Self {
        Self {
            data: vec![0; n_clusters * n_clusters * n_bins],
            n_clusters,
            n_bins,
        }
    }

    /// `(n_clusters, n_clusters, n_bins)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_clusters, self.n_clusters, self.n_bins)
    }

    /// Number of clusters along each of the first two axes
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Length of the lag axis
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Check if the tensor holds no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        (i * self.n_clusters + j) * self.n_bins
    }

    /// Count at `[i][j][k]`
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> i32 {
        assert!(k < self.n_bins, "lag bin {} out of bounds", k);
        self.data[self.offset(i, j) + k]
    }

    /// Overwrite the count at `[i][j][k]`
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: i32) {
        assert!(k < self.n_bins, "lag bin {} out of bounds", k);
        let offset = self.offset(i, j);
        self.data[offset + k] = value;
    }

    /// Add one to `[i][j][k]`
    #[inline]
    pub fn increment(&mut self, i: usize, j: usize, k: usize) {
        debug_assert!(k < self.n_bins);
        let offset = self.offset(i, j);
        self.data[offset + k] += 1;
    }

    /// Lag histogram of one ordered cluster pair
    pub fn pair(&self, i: usize, j: usize) -> &[i32] {
        let offset = self.offset(i, j);
        &self.data[offset..offset + self.n_bins]
    }

    /// Mutable lag histogram of one ordered cluster pair
    pub fn pair_mut(&mut self, i: usize, j: usize) -> &mut [i32] {
        let offset = self.offset(i, j);
        &mut self.data[offset..offset + self.n_bins]
    }

    /// Element-wise sum of another tensor of the same shape into this one
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn merge(&mut self, other: &CountTensor) {
        assert_eq!(self.shape(), other.shape(), "cannot merge tensors of different shape");
        for (dst, src) in self.data.iter_mut().zip(&other.data) {
            *dst += src;
        }
    }

    /// Total of all counts
    pub fn sum(&self) -> i64 {
        self.data.iter().map(|&c| i64::from(c)).sum()
    }

    /// Raw row-major storage
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Consume into raw row-major storage
    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }
}

impl fmt::Display for CountTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CountTensor({}x{}x{}, total={})",
            self.n_clusters,
            self.n_clusters,
            self.n_bins,
            self.sum()
        )
    }
}
