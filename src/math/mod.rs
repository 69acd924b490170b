//! Mathematical utilities for the generators

/// Binary min-heap keyed by integer priorities
pub mod heap;
/// Weighted selection and entropy calculations
pub mod probability;
