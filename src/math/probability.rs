//! Weighted random selection and entropy over a tile domain
//!
//! Both generators draw winners from the example's tile distribution
//! restricted to whatever their constraints still allow, and the collapse
//! ordering ranks cells by the Shannon entropy of that restricted
//! distribution.

use rand::Rng;

/// Draw an index from `weights` restricted to the `allowed` predicate
///
/// Sums the allowed weights, draws uniformly from `[0, total)`, and
/// returns the first allowed index whose running prefix sum exceeds the
/// draw. Returns `None` when nothing is allowed or the allowed weights sum
/// to zero. Identical RNG state and predicate produce identical results.
pub fn weighted_choice<R, F>(rng: &mut R, weights: &[f64], allowed: F) -> Option<usize>
where
    R: Rng,
    F: Fn(usize) -> bool,
{
    let total: f64 = weights
        .iter()
        .enumerate()
        .filter(|&(index, _)| allowed(index))
        .map(|(_, weight)| weight)
        .sum();
    if total <= 0.0 {
        return None;
    }
    let draw = rng.random::<f64>() * total;
    let mut prefix = 0.0;
    let mut last = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 || !allowed(index) {
            continue;
        }
        prefix += weight;
        last = Some(index);
        if draw < prefix {
            return Some(index);
        }
    }
    // Rounding in the prefix sums can leave the draw fractionally past the
    // final prefix; the last positive-weight candidate absorbs it.
    last
}

/// Shannon entropy of `weights` restricted to the `allowed` predicate
///
/// Computes `-Σ w·ln w` over allowed indices with positive weight. Indices
/// with zero weight contribute nothing.
pub fn shannon_entropy<F>(weights: &[f64], allowed: F) -> f64
where
    F: Fn(usize) -> bool,
{
    let mut entropy = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        if weight > 0.0 && allowed(index) {
            entropy -= weight * weight.ln();
        }
    }
    entropy
}
