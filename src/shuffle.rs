//! Fisher-Yates draws without replacement.
//!
//! The population (or a working copy of it) is shuffled from the back: for
//! `i = N-1 ..= 1`, swap `i` with `j = floor(u * (i + 1))`. Index 0 is never
//! swapped on its own since nothing is left to exchange it with. The first
//! `size` elements of the shuffled sequence form the sample.
//!
//! Every permutation is equally likely, so any prefix is a simple random sample.

use rand::Rng;

use crate::error::{Result, SampleError};
use crate::uniform::scaled_index;

/// Shuffle `values` in place.
pub fn fisher_yates<T, R: Rng + ?Sized>(values: &mut [T], rng: &mut R) {
    for i in (1..values.len()).rev() {
        let j = scaled_index(i + 1, rng.random::<f64>());
        values.swap(i, j);
    }
}

pub(crate) fn check_size(size: usize, population: usize) -> Result<()> {
    if size > population {
        return Err(SampleError::SizeExceedsPopulation { size, population });
    }
    Ok(())
}

/// Draw `size` elements without replacement, leaving `population` untouched.
///
/// # Errors
///
/// [`SampleError::SizeExceedsPopulation`] if `size > population.len()`.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    population: &[T],
    size: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    check_size(size, population.len())?;
    let mut work = population.to_vec();
    fisher_yates(&mut work, rng);
    work.truncate(size);
    Ok(work)
}

/// Shuffle `pool` in place, then remove and return its first `size` elements.
///
/// On error the pool is left as it was.
///
/// # Errors
///
/// [`SampleError::SizeExceedsPopulation`] if `size > pool.len()`.
pub fn sample_in_place<T, R: Rng + ?Sized>(
    pool: &mut Vec<T>,
    size: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    check_size(size, pool.len())?;
    fisher_yates(pool, rng);
    Ok(pool.drain(..size).collect())
}
