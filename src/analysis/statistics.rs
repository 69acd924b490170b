//! Occurrence counting and probability normalisation for the tile domain

/// Per-domain-index occurrence counts over an example map
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<u64>,
}

impl FrequencyTable {
    /// Create a table of zero counts over a domain of `domain_len` indices
    pub fn new(domain_len: usize) -> Self {
        Self {
            counts: vec![0; domain_len],
        }
    }

    /// Record one occurrence of a domain index
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the domain width.
    pub fn record(&mut self, index: usize) {
        assert!(
            index < self.counts.len(),
            "domain index {index} out of range"
        );
        if let Some(count) = self.counts.get_mut(index) {
            *count += 1;
        }
    }

    /// Occurrences recorded for a domain index
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Total occurrences recorded
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Width of the underlying domain
    pub fn domain_len(&self) -> usize {
        self.counts.len()
    }

    /// Counts normalised into a probability distribution
    ///
    /// An empty table yields an all-zero vector rather than dividing by a
    /// zero total; callers treat that as the empty-domain case.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&count| count as f64 / total as f64)
            .collect()
    }
}
