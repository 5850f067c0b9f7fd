//! Uniform draws with replacement.
//!
//! Each output slot takes one value `u` from the generator and reads
//! `population[floor(N * u)]`. Slots are independent, so duplicates are expected.

use rand::Rng;

use crate::error::{Result, SampleError};

/// `floor(n * u)`, clamped to the last valid index.
#[inline]
pub(crate) fn scaled_index(n: usize, u: f64) -> usize {
    ((n as f64 * u) as usize).min(n - 1)
}

/// Draw `size` indices in `0..n`, each equally likely, with replacement.
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `n == 0` and `size > 0`.
pub fn uniform_indices<R: Rng + ?Sized>(n: usize, size: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n == 0 && size > 0 {
        return Err(SampleError::InvalidArgument(
            "cannot draw with replacement from an empty population".into(),
        ));
    }
    Ok((0..size)
        .map(|_| scaled_index(n, rng.random::<f64>()))
        .collect())
}

/// Draw `size` elements of `population` uniformly with replacement.
///
/// # Errors
///
/// [`SampleError::InvalidArgument`] if `population` is empty and `size > 0`.
pub fn sample_with_replacement<T: Clone, R: Rng + ?Sized>(
    population: &[T],
    size: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    Ok(uniform_indices(population.len(), size, rng)?
        .into_iter()
        .map(|i| population[i].clone())
        .collect())
}
