//! Greedy frontier generation
//!
//! A cheaper alternative to wave function collapse: cells leave a FIFO
//! queue one at a time and immediately commit to a tile drawn from the
//! example distribution, restricted to whatever the already-placed
//! neighbours allow. Output is locally plausible but carries none of the
//! global coherence the constraint solver buys; the two share the same
//! construct/step/result shape.

use crate::algorithm::Generator;
use crate::analysis::adjacency::{Direction, DomainSet};
use crate::analysis::analyzer::Analysis;
use crate::spatial::grid::Tilemap;
use crate::spatial::tiles::Stack;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// One-shot greedy generator expanding outward from fixed cells
pub struct GreedyBfs<'a> {
    analysis: &'a Analysis,
    width: usize,
    height: usize,
    placed: Array2<Option<usize>>,
    queue: VecDeque<(usize, usize)>,
    rng: StdRng,
    failed: bool,
}

impl<'a> GreedyBfs<'a> {
    /// Create a generator for a `width`×`height` grid
    ///
    /// Fixed cells (generator-local coordinates) are placed immediately and
    /// queued first so growth radiates from them; every remaining cell is
    /// queued afterwards in scan order, so the grid fills even when no cell
    /// is fixed. Fixed stacks outside the domain are ignored.
    pub fn new(
        analysis: &'a Analysis,
        width: usize,
        height: usize,
        fixed: &Tilemap,
        seed: u64,
    ) -> Self {
        let mut generator = Self {
            analysis,
            width,
            height,
            placed: Array2::from_elem((width, height), None),
            queue: VecDeque::new(),
            rng: StdRng::seed_from_u64(seed),
            failed: false,
        };
        if analysis.is_trivial() {
            return generator;
        }
        for ((fx, fy), stack) in fixed.cells() {
            if fx < 0 || fy < 0 {
                continue;
            }
            let (x, y) = (fx as usize, fy as usize);
            if x >= width || y >= height {
                continue;
            }
            let Some(choice) = analysis.index_of(stack) else {
                continue;
            };
            if let Some(cell) = generator.placed.get_mut((x, y)) {
                *cell = Some(choice);
            }
            generator.queue.push_back((x, y));
        }
        for x in 0..width {
            for y in 0..height {
                if generator.placed.get((x, y)).is_some_and(Option::is_none) {
                    generator.queue.push_back((x, y));
                }
            }
        }
        generator
    }

    /// Whether generation stopped on a cell with no compatible tile
    pub const fn is_failed(&self) -> bool {
        self.failed
    }

    /// Tiles the placed neighbours of `(x, y)` still permit here
    fn allowed_at(&self, x: usize, y: usize) -> DomainSet {
        let adjacency = self.analysis.adjacency();
        let mut allowed = DomainSet::full(self.analysis.domain_len());
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                continue;
            }
            if let Some(&Some(neighbour)) = self.placed.get((nx as usize, ny as usize)) {
                allowed.intersect_with(adjacency.allowed(neighbour, direction.inverse()));
            }
        }
        allowed
    }

    fn enqueue_open_neighbours(&mut self, x: usize, y: usize) {
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if self.placed.get((nx, ny)).is_some_and(Option::is_none) {
                self.queue.push_back((nx, ny));
            }
        }
    }
}

impl Generator for GreedyBfs<'_> {
    fn step(&mut self) -> bool {
        let Some((x, y)) = self.queue.pop_front() else {
            return true;
        };
        if self.placed.get((x, y)).is_some_and(Option::is_none) {
            let allowed = self.allowed_at(x, y);
            let winner = self
                .analysis
                .lottery(&mut self.rng, |tile| allowed.contains(tile));
            let Some(choice) = winner else {
                // Nothing fits between the committed neighbours; there is no
                // backtracking, so the run stops where it stands.
                self.failed = true;
                self.queue.clear();
                return true;
            };
            if let Some(cell) = self.placed.get_mut((x, y)) {
                *cell = Some(choice);
            }
        }
        self.enqueue_open_neighbours(x, y);
        self.queue.is_empty()
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
