//! Dense cluster indexing
//!
//! Spike sorters hand out arbitrary non-negative labels. Analysis arrays want
//! contiguous rows, so [`ClusterIndex`] maps every label present in the input
//! onto `0..n_clusters` in ascending label order.
//!
//! The lookup is a direct-addressing table sized by the largest label rather
//! than a hash map or a binary search, which keeps per-spike lookups to a
//! single bounds-checked load.

/// Returned by [`ClusterIndex::index_of_signed`] for labels outside the set
pub const NO_MATCH: i64 = -1;

const UNMAPPED: u32 = u32::MAX;

/// Sorted cluster set with a label → dense index lookup table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterIndex {
    clusters: Vec<u32>,
    lookup: Vec<u32>,
}

impl ClusterIndex {
    /// Build the index from the labels of every spike
    pub fn from_labels(labels: &[u32]) -> Self {
        let max_label = match labels.iter().max() {
            Some(&max) => max as usize,
            None => return Self::default(),
        };

        // Presence pass, then ranks in ascending label order
        let mut lookup = vec![UNMAPPED; max_label + 1];
        for &label in labels {
            lookup[label as usize] = 0;
        }

        let mut clusters = Vec::new();
        for (label, slot) in lookup.iter_mut().enumerate() {
            if *slot != UNMAPPED {
                *slot = clusters.len() as u32;
                clusters.push(label as u32);
            }
        }

        Self { clusters, lookup }
    }

    /// Sorted distinct labels
    pub fn clusters(&self) -> &[u32] {
        &self.clusters
    }

    /// Consume the index, keeping the sorted labels
    pub fn into_clusters(self) -> Vec<u32> {
        self.clusters
    }

    /// Number of distinct clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if no cluster is indexed
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Dense index of a label, `None` if the label never occurred
    #[inline]
    pub fn dense(&self, label: u32) -> Option<usize> {
        match self.lookup.get(label as usize) {
            Some(&slot) if slot != UNMAPPED => Some(slot as usize),
            _ => None,
        }
    }

    /// Dense index with the signed sentinel convention.
    ///
    /// [`NO_MATCH`] maps to itself, as does every negative or unknown label,
    /// so callers that use `-1` as a "no spike" marker never receive a
    /// spurious dense index.
    pub fn index_of_signed(&self, label: i64) -> i64 {
        if label < 0 || label > i64::from(u32::MAX) {
            return NO_MATCH;
        }
        self.dense(label as u32).map_or(NO_MATCH, |i| i as i64)
    }

    /// Dense index of every label.
    ///
    /// Labels absent from the index are a caller error; they are mapped to
    /// `usize::MAX` so any later array access fails loudly.
    pub fn remap(&self, labels: &[u32]) -> Vec<usize> {
        labels
            .iter()
            .map(|&label| self.dense(label).unwrap_or(usize::MAX))
            .collect()
    }
}
