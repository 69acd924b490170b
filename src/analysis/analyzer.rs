//! Example-map analysis: domain enumeration, frequencies, and adjacency
//!
//! One pass over the example assigns every distinct stack a stable domain
//! index; a second pass counts occurrences and records which stacks were
//! seen next to which, in every direction, with off-grid neighbours read
//! as the empty stack. The result is the immutable input both generators
//! work from.

use crate::analysis::adjacency::{AdjacencyRules, Direction};
use crate::analysis::statistics::FrequencyTable;
use crate::math::probability;
use crate::spatial::grid::Tilemap;
use crate::spatial::tiles::Stack;
use rand::Rng;
use std::collections::HashMap;

/// Immutable description of an example map: domain, probabilities, adjacency
///
/// Domain index `0` is always the empty stack; the remaining indices
/// enumerate distinct stacks in the order the sorted cell scan first met
/// them, so the same example always produces the same indices.
#[derive(Clone, Debug)]
pub struct Analysis {
    domain: Vec<Stack>,
    index: HashMap<Stack, usize>,
    probabilities: Vec<f64>,
    adjacency: AdjacencyRules,
}

impl Analysis {
    /// Analyze an example map
    ///
    /// An empty example yields the one-element domain holding the empty
    /// stack, an all-zero probability vector, and no adjacency; generators
    /// treat that as immediately done.
    pub fn from_tilemap(example: &Tilemap) -> Self {
        let mut domain = vec![Stack::EMPTY];
        let mut index = HashMap::new();
        index.insert(Stack::EMPTY, 0);
        for (_, stack) in example.cells() {
            if !index.contains_key(stack) {
                index.insert(stack.clone(), domain.len());
                domain.push(stack.clone());
            }
        }

        let mut frequencies = FrequencyTable::new(domain.len());
        let mut adjacency = AdjacencyRules::new(domain.len());
        for ((x, y), stack) in example.cells() {
            let tile = index.get(stack).copied().unwrap_or(0);
            frequencies.record(tile);
            for direction in Direction::ALL {
                let (dx, dy) = direction.offset();
                let neighbour = example.get(x + dx, y + dy);
                let neighbour_tile = index.get(neighbour).copied().unwrap_or(0);
                adjacency.allow(tile, direction, neighbour_tile);
            }
        }

        Self {
            domain,
            index,
            probabilities: frequencies.probabilities(),
            adjacency,
        }
    }

    /// Distinct stacks, indexed by their domain index
    pub fn domain(&self) -> &[Stack] {
        &self.domain
    }

    /// Number of domain entries, the empty stack included
    pub fn domain_len(&self) -> usize {
        self.domain.len()
    }

    /// Stack behind a domain index, if the index is in range
    pub fn stack(&self, index: usize) -> Option<&Stack> {
        self.domain.get(index)
    }

    /// Domain index of a stack observed in the example
    pub fn index_of(&self, stack: &Stack) -> Option<usize> {
        self.index.get(stack).copied()
    }

    /// Occurrence probability per domain index; sums to one unless the
    /// example was empty
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Per-direction compatibility relation over the domain
    pub const fn adjacency(&self) -> &AdjacencyRules {
        &self.adjacency
    }

    /// Test whether the example contributed nothing beyond the empty stack
    pub fn is_trivial(&self) -> bool {
        self.domain.len() <= 1
    }

    /// Draw a domain index from the example distribution restricted to
    /// `allowed`
    ///
    /// Returns `None` when no allowed index carries positive weight.
    pub fn lottery<R, F>(&self, rng: &mut R, allowed: F) -> Option<usize>
    where
        R: Rng,
        F: Fn(usize) -> bool,
    {
        probability::weighted_choice(rng, &self.probabilities, allowed)
    }
}
