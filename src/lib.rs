//! Example-driven tilemap synthesis via wave function collapse
//!
//! Feed the analyzer a small hand-authored tilemap and it infers the tile
//! domain, occurrence frequencies, and per-direction adjacency. The
//! generators then synthesise larger maps that stay locally consistent
//! with the example, preserving any cells the caller pins in advance.

#![forbid(unsafe_code)]

/// Generators and the shared stepping interface
pub mod algorithm;
/// Example-map analysis: domain, frequencies, adjacency
pub mod analysis;
/// Map-file persistence, errors, and progress helpers
pub mod io;
/// Weighted selection, entropy, and heap utilities
pub mod math;
/// Tiles, stacks, sparse maps, and dense lattices
pub mod spatial;

pub use io::error::{MapError, Result};
