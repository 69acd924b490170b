//! Tilemap generators driven by an example analysis
//!
//! Both generators share one shape: build an instance per generation call,
//! invoke [`Generator::step`] until it reports done, then read the result
//! grid. The step function is the only suspension point, which lets a host
//! interleave generation with its own work; capping the number of steps is
//! also the host's timeout mechanism.

/// Greedy frontier generator
pub mod greedy;
/// Support-tracking wave function collapse
pub mod wfc;

pub use greedy::GreedyBfs;
pub use wfc::WaveCollapse;

use crate::analysis::analyzer::Analysis;
use crate::spatial::grid::Tilemap;
use crate::spatial::tiles::Stack;
use ndarray::Array2;

/// Single-step tilemap generator
///
/// Implementations own their state exclusively; dropping the value is
/// cancellation. Given identical construction inputs, the step sequence
/// and result are reproducible bit for bit.
pub trait Generator {
    /// Advance one unit of work; returns `true` once no work remains
    fn step(&mut self) -> bool;

    /// Copy of the output grid; `None` marks a cell that never collapsed
    fn result(&self) -> Array2<Option<Stack>>;

    /// Step until done or the budget runs out; returns whether work finished
    fn run_to_completion(&mut self, max_steps: usize) -> bool {
        for _ in 0..max_steps {
            if self.step() {
                return true;
            }
        }
        false
    }
}

/// Which generator a region rebuild uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Constraint-propagating solver; slower, globally coherent
    WaveCollapse,
    /// Greedy frontier; fast, locally plausible
    Greedy,
}

/// Rebuild a `width`×`height` region of `map` in place
///
/// The whole map serves as the example; whatever already occupies the
/// region is pinned and preserved. Generated stacks overwrite the region,
/// cells that generated to the empty stack are cleared, and cells left
/// unfilled by a contradiction keep their previous content.
pub fn regenerate_region(
    map: &mut Tilemap,
    origin: (i32, i32),
    width: usize,
    height: usize,
    method: Method,
    seed: u64,
) {
    let analysis = Analysis::from_tilemap(map);
    let fixed = map.extract_region(origin.0, origin.1, width, height);
    let grid = match method {
        Method::WaveCollapse => {
            let mut generator = WaveCollapse::new(&analysis, width, height, &fixed, seed);
            while !generator.step() {}
            generator.result()
        }
        Method::Greedy => {
            let mut generator = GreedyBfs::new(&analysis, width, height, &fixed, seed);
            while !generator.step() {}
            generator.result()
        }
    };
    for ((x, y), cell) in grid.indexed_iter() {
        let (gx, gy) = (origin.0 + x as i32, origin.1 + y as i32);
        match cell {
            Some(stack) if !stack.is_empty() => map.insert(gx, gy, stack.clone()),
            Some(_) => map.remove(gx, gy),
            None => {}
        }
    }
}
