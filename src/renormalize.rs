//! Weighted draws without replacement by sequential renormalization.
//!
//! Each draw scans the remaining probabilities in population order, takes the
//! first index whose running sum is not less than a fresh uniform `u`, then
//! divides every other probability by `1 - p_j` and zeroes `p_j`. The result
//! follows probability-proportional sequential sampling: the first pick reflects
//! the original weights most strongly, and the sample is order-dependent.
//!
//! Cost is O(size · N).

use rand::Rng;

use crate::error::Result;
use crate::options::validate_probs;
use crate::shuffle::check_size;

/// First index with positive mass whose cumulative sum is not less than `u`.
///
/// Zero-mass entries are skipped so they can never be chosen, even for `u == 0`.
/// If rounding leaves the total below `u`, the last index with mass is taken.
fn select(probs: &[f64], u: f64) -> Option<usize> {
    let mut psum = 0.0;
    let mut last = None;
    for (i, &p) in probs.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        psum += p;
        last = Some(i);
        if psum >= u {
            return Some(i);
        }
    }
    last
}

/// Draw `size` distinct indices under `probs` without replacement.
///
/// If the positive mass runs out before `size` picks (fewer non-zero entries than
/// `size`), the remaining unpicked indices share the leftover mass uniformly.
///
/// # Errors
///
/// - [`SampleError::InvalidOptionValue`](crate::SampleError::InvalidOptionValue)
///   if `probs` is not a probability vector.
/// - [`SampleError::SizeExceedsPopulation`](crate::SampleError::SizeExceedsPopulation)
///   if `size > probs.len()`.
pub fn renormalized_indices<R: Rng + ?Sized>(
    probs: &[f64],
    size: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    validate_probs(probs, probs.len())?;
    check_size(size, probs.len())?;

    let mut p = probs.to_vec();
    let mut taken = vec![false; p.len()];
    let mut out = Vec::with_capacity(size);

    for _ in 0..size {
        let u = rng.random::<f64>();
        let Some(j) = select(&p, u) else {
            break;
        };
        out.push(j);

        let rest = 1.0 - p[j];
        taken[j] = true;
        p[j] = 0.0;

        if rest > 0.0 && p.iter().any(|&x| x > 0.0) {
            for x in &mut p {
                *x /= rest;
            }
        } else {
            let remaining = taken.iter().filter(|&&t| !t).count();
            for (x, &t) in p.iter_mut().zip(&taken) {
                *x = if t { 0.0 } else { 1.0 / remaining as f64 };
            }
        }
    }

    Ok(out)
}

/// Draw `size` elements of `population` without replacement under `probs`.
///
/// # Errors
///
/// As [`renormalized_indices`], plus a length mismatch between `probs` and
/// `population` is an invalid `probs` value.
pub fn sample_weighted_without_replacement<T: Clone, R: Rng + ?Sized>(
    population: &[T],
    size: usize,
    probs: &[f64],
    rng: &mut R,
) -> Result<Vec<T>> {
    validate_probs(probs, population.len())?;
    Ok(renormalized_indices(probs, size, rng)?
        .into_iter()
        .map(|i| population[i].clone())
        .collect())
}
