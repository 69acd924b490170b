//! Support-tracking wave function collapse
//!
//! The solver keeps, for every cell, tile, and direction, a count of the
//! tiles at the neighbouring cell that still justify the tile here. Banning
//! a tile decrements the counts it was propping up; a count reaching zero
//! queues the next ban. Collapse picks the uncollapsed cell with the lowest
//! Shannon entropy and draws its tile from the example distribution.
//!
//! There is no backtracking. A cell running out of tiles freezes the run;
//! the result reports such cells as unfilled and retrying under another
//! seed is the caller's decision.

use crate::algorithm::Generator;
use crate::analysis::adjacency::Direction;
use crate::analysis::analyzer::Analysis;
use crate::math::probability;
use crate::spatial::grid::Tilemap;
use crate::spatial::lattice::Lattice;
use crate::spatial::tiles::Stack;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Entropy-driven constraint solver over an example-derived domain
///
/// Construct one per generation call; the analysis is borrowed read-only
/// and all mutable state is owned exclusively. Step until
/// [`Generator::step`] reports done, then read [`Generator::result`].
pub struct WaveCollapse<'a> {
    analysis: &'a Analysis,
    width: usize,
    height: usize,
    /// Banned flags, shaped `[width, height, domain]`
    banned: Lattice<bool>,
    ban_count: Array2<u32>,
    /// Remaining justification counts, shaped `[width, height, domain, 4]`
    support: Lattice<u32>,
    placed: Array2<Option<usize>>,
    worklist: Vec<(usize, usize, usize)>,
    rng: StdRng,
    done: bool,
    contradicted: bool,
    validate: bool,
}

impl<'a> WaveCollapse<'a> {
    /// Create a solver for a `width`×`height` grid
    ///
    /// Cells of `fixed` (in generator-local coordinates) whose stacks map
    /// into the domain are pinned before the first step; fixed stacks the
    /// example never produced are ignored and their cells stay free, as do
    /// fixed coordinates outside the grid.
    pub fn new(
        analysis: &'a Analysis,
        width: usize,
        height: usize,
        fixed: &Tilemap,
        seed: u64,
    ) -> Self {
        let domain_len = analysis.domain_len();
        let directions = Direction::ALL.len();
        let trivial = analysis.is_trivial() || width == 0 || height == 0;
        let mut solver = Self {
            analysis,
            width,
            height,
            banned: Lattice::from_elem(&[width, height, domain_len], false),
            ban_count: Array2::zeros((width, height)),
            support: Lattice::zeros(&[width, height, domain_len, directions]),
            placed: Array2::from_elem((width, height), None),
            worklist: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            done: trivial,
            contradicted: false,
            validate: false,
        };
        if !trivial {
            solver.initialize_support();
            solver.pin_fixed(fixed);
        }
        solver
    }

    /// Re-check solver invariants after every step
    ///
    /// Verification walks the whole lattice per step; keep it to tests and
    /// debugging sessions.
    pub const fn with_validation(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the run froze on a cell with no remaining tiles
    pub const fn is_contradicted(&self) -> bool {
        self.contradicted
    }

    /// Seed every support counter and queue tiles with no justification
    ///
    /// `support[x, y, i, d]` starts at the number of tiles the example
    /// allows in direction `d` of `i`: before any bans, every one of them
    /// is still available at the neighbour. A tile allowing nothing in some
    /// direction can never be placed and is queued for banning everywhere.
    fn initialize_support(&mut self) {
        let adjacency = self.analysis.adjacency();
        let directions = Direction::ALL.len();
        let counts: Vec<u32> = (0..self.analysis.domain_len())
            .flat_map(|tile| {
                Direction::ALL.map(|direction| adjacency.count(tile, direction) as u32)
            })
            .collect();
        for x in 0..self.width {
            for y in 0..self.height {
                for (tile, row) in counts.chunks_exact(directions).enumerate() {
                    let mut starved = false;
                    for (direction, &count) in row.iter().enumerate() {
                        if count == 0 {
                            starved = true;
                        } else {
                            self.support.set(&[x, y, tile, direction], count);
                        }
                    }
                    if starved {
                        self.worklist.push((x, y, tile));
                    }
                }
            }
        }
    }

    /// Pin pre-assigned cells and queue bans for every other tile there
    fn pin_fixed(&mut self, fixed: &Tilemap) {
        let domain_len = self.analysis.domain_len();
        for ((fx, fy), stack) in fixed.cells() {
            if fx < 0 || fy < 0 {
                continue;
            }
            let (x, y) = (fx as usize, fy as usize);
            if x >= self.width || y >= self.height {
                continue;
            }
            // A stack outside the domain cannot be pinned; leave the cell free.
            let Some(choice) = self.analysis.index_of(stack) else {
                continue;
            };
            if let Some(cell) = self.placed.get_mut((x, y)) {
                *cell = Some(choice);
            }
            for tile in 0..domain_len {
                if tile != choice {
                    self.worklist.push((x, y, tile));
                }
            }
        }
    }

    fn propagate(&mut self) {
        while let Some((x, y, tile)) = self.worklist.pop() {
            self.ban(x, y, tile);
            if self.contradicted {
                self.done = true;
                return;
            }
        }
    }

    /// Eliminate `tile` at `(x, y)` and withdraw its support from neighbours
    ///
    /// Idempotent. For each direction `d`, every tile `n` the example
    /// allows there loses one justification from the inverse side at the
    /// neighbouring cell; a justification count reaching zero queues
    /// `(neighbour, n)` for banning. Neighbours already collapsed are left
    /// alone.
    fn ban(&mut self, x: usize, y: usize, tile: usize) {
        if *self.banned.at(&[x, y, tile]) {
            return;
        }
        self.banned.set(&[x, y, tile], true);
        let mut exhausted = false;
        if let Some(count) = self.ban_count.get_mut((x, y)) {
            *count += 1;
            exhausted = *count as usize == self.analysis.domain_len();
        }
        if exhausted {
            self.contradicted = true;
            return;
        }
        let adjacency = self.analysis.adjacency();
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if self.placed.get((nx, ny)).is_some_and(Option::is_some) {
                continue;
            }
            let inverse = direction.inverse().index();
            for neighbour_tile in adjacency.allowed(tile, direction).iter() {
                let slot = self.support.at_mut(&[nx, ny, neighbour_tile, inverse]);
                *slot -= 1;
                if *slot == 0 {
                    self.worklist.push((nx, ny, neighbour_tile));
                }
            }
        }
    }

    /// Collapse the lowest-entropy cell, or mark the run done
    fn collapse(&mut self) {
        let Some((x, y)) = self.least_entropy() else {
            self.done = true;
            return;
        };
        let banned = &self.banned;
        let probabilities = self.analysis.probabilities();
        let winner = probability::weighted_choice(&mut self.rng, probabilities, |tile| {
            !*banned.at(&[x, y, tile])
        });
        let Some(choice) = winner else {
            self.done = true;
            self.contradicted = true;
            return;
        };
        if let Some(cell) = self.placed.get_mut((x, y)) {
            *cell = Some(choice);
        }
        for tile in 0..self.analysis.domain_len() {
            if tile != choice {
                self.worklist.push((x, y, tile));
            }
        }
    }

    /// Uncollapsed cell with the lowest entropy, first in scan order on ties
    fn least_entropy(&self) -> Option<(usize, usize)> {
        let mut best = None;
        let mut best_entropy = f64::INFINITY;
        for x in 0..self.width {
            for y in 0..self.height {
                if self.placed.get((x, y)).is_some_and(Option::is_some) {
                    continue;
                }
                let entropy = self.cell_entropy(x, y);
                if entropy < best_entropy {
                    best_entropy = entropy;
                    best = Some((x, y));
                }
            }
        }
        best
    }

    /// Shannon entropy of the example distribution over unbanned tiles
    fn cell_entropy(&self, x: usize, y: usize) -> f64 {
        probability::shannon_entropy(self.analysis.probabilities(), |tile| {
            !*self.banned.at(&[x, y, tile])
        })
    }

    /// Assert the bookkeeping invariants of the solver state
    ///
    /// # Panics
    ///
    /// Panics when the ban ledger disagrees with the banned flags, when two
    /// placed neighbours violate adjacency, or when a quiesced lattice
    /// holds an unbanned tile with no justification from some open side.
    fn check_invariants(&self) {
        let domain_len = self.analysis.domain_len();
        let adjacency = self.analysis.adjacency();
        for x in 0..self.width {
            for y in 0..self.height {
                let flagged = (0..domain_len)
                    .filter(|&tile| *self.banned.at(&[x, y, tile]))
                    .count();
                let recorded = self.ban_count.get((x, y)).copied().unwrap_or(0) as usize;
                assert_eq!(recorded, flagged, "ban ledger out of sync at ({x}, {y})");

                let here = self.placed.get((x, y)).copied().flatten();
                for direction in Direction::ALL {
                    let (dx, dy) = direction.offset();
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    let there = self.placed.get((nx, ny)).copied().flatten();
                    if let (Some(tile), Some(neighbour_tile)) = (here, there) {
                        assert!(
                            adjacency.contains(tile, direction, neighbour_tile),
                            "placed tiles {tile} and {neighbour_tile} clash across {direction} at ({x}, {y})"
                        );
                    }
                    if self.worklist.is_empty() && !self.contradicted && here.is_none() {
                        for tile in 0..domain_len {
                            if *self.banned.at(&[x, y, tile]) || there.is_some() {
                                continue;
                            }
                            assert!(
                                *self.support.at(&[x, y, tile, direction.index()]) > 0,
                                "unbanned tile {tile} lacks {direction} support at ({x}, {y})"
                            );
                        }
                    }
                }
            }
        }
    }
}

impl Generator for WaveCollapse<'_> {
    fn step(&mut self) -> bool {
        if self.done {
            return true;
        }
        if self.worklist.is_empty() {
            self.collapse();
        } else {
            self.propagate();
        }
        if self.validate {
            self.check_invariants();
        }
        self.done
    }

    fn result(&self) -> Array2<Option<Stack>> {
        Array2::from_shape_fn((self.width, self.height), |(x, y)| {
            self.placed
                .get((x, y))
                .copied()
                .flatten()
                .and_then(|tile| self.analysis.stack(tile).cloned())
        })
    }
}
