//! Hypermutation operators on price vectors.
//!
//! - [`invert_segment`]: contiguous inversion between two distinct cut points
//! - [`mutation_probability`]: revenue-dependent hypermutation rate

use rand::Rng;

/// Probability that a clone with `revenue` is hypermutated:
/// `exp(-revenue / best_fitness_constant)`.
///
/// Revenue 0 always mutates; higher revenue mutates less often.
pub fn mutation_probability(revenue: f64, best_fitness_constant: f64) -> f64 {
    (-revenue / best_fitness_constant).exp()
}

/// Reverses `values[a..=b]` in place for two distinct random cut points
/// `a < b`.
///
/// The result is a permutation of the input, so an in-bounds price
/// vector stays in bounds. Vectors shorter than two are left unchanged.
///
/// Returns the cut points used, or `None` when nothing was inverted.
pub fn invert_segment<R: Rng>(values: &mut [f64], rng: &mut R) -> Option<(usize, usize)> {
    let (a, b) = distinct_cut_points(values.len(), rng)?;
    values[a..=b].reverse();
    Some((a, b))
}

/// Two distinct indices in `0..n`, ordered so `a < b`.
fn distinct_cut_points<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let a = rng.random_range(0..n);
    // Draw from the n-1 other indices so no retry loop is needed.
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    Some(if a < b { (a, b) } else { (b, a) })
}
