//! Directions and per-direction adjacency over the tile domain
//!
//! Adjacency is stored as one bitset of domain indices per
//! `(tile, direction)` pair, giving constant-time membership checks and a
//! popcount for support initialisation.

use bitvec::prelude::*;
use std::fmt;

/// The four cardinal neighbour directions of a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing `y`
    North,
    /// Towards increasing `y`
    South,
    /// Towards decreasing `x`
    West,
    /// Towards increasing `x`
    East,
}

impl Direction {
    /// Every direction, in the order used for direction-keyed storage
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];

    /// The direction pointing back across the same edge
    pub const fn inverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Coordinate offset of the neighbour in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
        }
    }

    /// Stable position of this direction in [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::West => 2,
            Self::East => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        };
        write!(f, "{name}")
    }
}

/// Set of domain indices backed by a fixed-width bitset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainSet {
    bits: BitVec,
}

impl DomainSet {
    /// Create a set over a domain of `len` indices with nothing present
    pub fn empty(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Create a set over a domain of `len` indices with everything present
    pub fn full(len: usize) -> Self {
        Self {
            bits: bitvec![1; len],
        }
    }

    /// Width of the underlying domain
    pub fn domain_len(&self) -> usize {
        self.bits.len()
    }

    /// Add an index; returns whether it was newly inserted
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the domain width.
    pub fn insert(&mut self, index: usize) -> bool {
        let present = self.contains(index);
        self.bits.set(index, true);
        !present
    }

    /// Test index membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|bit| *bit)
    }

    /// Number of present indices
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test whether no index is present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Keep only indices present in both sets
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Present indices in increasing order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainSet({} of {})", self.count(), self.domain_len())
    }
}

/// Per-direction compatibility relation over domain indices
///
/// `allowed(i, d)` answers "which tiles may sit in direction `d` of tile
/// `i`". Recording an observation writes the edge from both endpoints, so
/// the relation is symmetric by construction:
/// `j ∈ allowed(i, d)` iff `i ∈ allowed(j, d.inverse())`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyRules {
    domain_len: usize,
    sets: Vec<DomainSet>,
}

impl AdjacencyRules {
    /// Create empty rules over a domain of `domain_len` indices
    pub fn new(domain_len: usize) -> Self {
        Self {
            domain_len,
            sets: vec![DomainSet::empty(domain_len); domain_len * Direction::ALL.len()],
        }
    }

    /// Width of the underlying domain
    pub const fn domain_len(&self) -> usize {
        self.domain_len
    }

    const fn slot(&self, tile: usize, direction: Direction) -> usize {
        tile * Direction::ALL.len() + direction.index()
    }

    /// Record that `neighbour` was observed in direction `direction` of `tile`
    ///
    /// Also records the mirrored edge, keeping the relation symmetric.
    ///
    /// # Panics
    ///
    /// Panics when either index is outside the domain width.
    pub fn allow(&mut self, tile: usize, direction: Direction, neighbour: usize) {
        assert!(
            tile < self.domain_len && neighbour < self.domain_len,
            "adjacency indices ({tile}, {neighbour}) exceeds domain width {}",
            self.domain_len
        );
        let forward = self.slot(tile, direction);
        if let Some(set) = self.sets.get_mut(forward) {
            set.insert(neighbour);
        }
        let backward = self.slot(neighbour, direction.inverse());
        if let Some(set) = self.sets.get_mut(backward) {
            set.insert(tile);
        }
    }

    /// Tiles that may sit in direction `direction` of `tile`
    ///
    /// # Panics
    ///
    /// Panics when `tile` is outside the domain width.
    pub fn allowed(&self, tile: usize, direction: Direction) -> &DomainSet {
        assert!(
            tile < self.domain_len,
            "tile {tile} exceeds domain width {}",
            self.domain_len
        );
        let slot = self.slot(tile, direction);
        self.sets
            .get(slot)
            .unwrap_or_else(|| unreachable!("validated slot {slot} out of range"))
    }

    /// Test whether `neighbour` may sit in direction `direction` of `tile`
    ///
    /// # Panics
    ///
    /// Panics when `tile` is outside the domain width.
    pub fn contains(&self, tile: usize, direction: Direction, neighbour: usize) -> bool {
        self.allowed(tile, direction).contains(neighbour)
    }

    /// Number of tiles that may sit in direction `direction` of `tile`
    ///
    /// # Panics
    ///
    /// Panics when `tile` is outside the domain width.
    pub fn count(&self, tile: usize, direction: Direction) -> usize {
        self.allowed(tile, direction).count()
    }

    /// Verify the mirror-edge invariant over the whole relation
    pub fn is_symmetric(&self) -> bool {
        for tile in 0..self.domain_len {
            for direction in Direction::ALL {
                for neighbour in self.allowed(tile, direction).iter() {
                    if !self.contains(neighbour, direction.inverse(), tile) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
