//! Spatial data structures for maps and solver state
//!
//! This module contains the value types the rest of the crate is built on:
//! - Tile identifiers and per-cell tile stacks
//! - The sparse tilemap with empty-stack defaults
//! - The dense fixed-shape lattice backing generator state

/// Sparse tile grid keyed by signed coordinates
pub mod grid;
/// Fixed-shape dense n-dimensional storage
pub mod lattice;
/// Tile identifiers and layered stacks
pub mod tiles;

pub use grid::Tilemap;
pub use lattice::Lattice;
pub use tiles::{Stack, Tile};
