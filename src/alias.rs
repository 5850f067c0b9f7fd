//! Weighted draws with replacement (Vose's alias method).
//!
//! Setup is O(N): probabilities are scaled by `N` and split into a `small`
//! worklist (scaled mass < 1) and a `large` one (≥ 1). Each small bucket is
//! topped up by a large donor, which becomes its alias; the donor's residual
//! mass decides which list it goes back on. Buckets left over once either list
//! empties are rounding leftovers and get probability 1.
//!
//! Each draw is O(1) and consumes two uniforms: one picks a bucket, the other
//! decides between the bucket and its alias.
//!
//! ## References
//!
//! - Walker (1977): *An efficient method for generating discrete random variables
//!   with general distributions*.
//! - Vose (1991): *A linear algorithm for generating random numbers with a given
//!   distribution*.

use rand::Rng;

use crate::error::Result;
use crate::options::validate_probs;
use crate::uniform::scaled_index;

/// Probability and alias tables over `N` buckets.
#[derive(Debug, Clone)]
pub struct AliasTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build the tables from a probability vector. **O(n)**.
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidOptionValue`](crate::SampleError::InvalidOptionValue)
    /// if `probs` is empty, has a negative or non-finite entry, or does not sum to one.
    pub fn new(probs: &[f64]) -> Result<Self> {
        validate_probs(probs, probs.len())?;

        let n = probs.len();
        let mut scaled: Vec<f64> = probs.iter().map(|&p| p * n as f64).collect();
        let mut prob = vec![0.0; n];
        let mut alias: Vec<usize> = (0..n).collect();

        let mut small: Vec<usize> = Vec::with_capacity(n);
        let mut large: Vec<usize> = Vec::with_capacity(n);
        for (i, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while let (Some(&l), Some(&g)) = (small.last(), large.last()) {
            small.pop();
            large.pop();

            prob[l] = scaled[l];
            alias[l] = g;

            scaled[g] += scaled[l] - 1.0;
            if scaled[g] < 1.0 {
                small.push(g);
            } else {
                large.push(g);
            }
        }

        for i in small.into_iter().chain(large) {
            prob[i] = 1.0;
        }

        Ok(Self { prob, alias })
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Draw a single index in O(1).
    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let l = scaled_index(self.prob.len(), rng.random::<f64>());
        if rng.random::<f64>() < self.prob[l] {
            l
        } else {
            self.alias[l]
        }
    }
}

/// Draw `size` elements of `population` with replacement under `probs`.
///
/// # Errors
///
/// [`SampleError::InvalidOptionValue`](crate::SampleError::InvalidOptionValue)
/// if `probs` is not a probability vector of the same length as `population`.
pub fn sample_weighted_with_replacement<T: Clone, R: Rng + ?Sized>(
    population: &[T],
    size: usize,
    probs: &[f64],
    rng: &mut R,
) -> Result<Vec<T>> {
    validate_probs(probs, population.len())?;
    let table = AliasTable::new(probs)?;
    Ok((0..size)
        .map(|_| population[table.sample_index(rng)].clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SampleError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chi2(counts: &[usize], probs: &[f64], draws: usize) -> f64 {
        counts
            .iter()
            .zip(probs)
            .filter(|&(_, &p)| p > 0.0)
            .map(|(&c, &p)| {
                let expected = draws as f64 * p;
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    #[test]
    fn table_matches_marginals() {
        let probs = [
            1.0 / 12.0,
            2.0 / 6.0,
            2.0 / 6.0,
            1.0 / 12.0,
            1.0 / 12.0,
            1.0 / 12.0,
        ];
        let table = AliasTable::new(&probs).expect("valid probs");
        assert_eq!(table.len(), 6);

        let draws = 10_000;
        let mut rng = ChaCha8Rng::seed_from_u64(321);
        let mut counts = vec![0usize; probs.len()];
        for _ in 0..draws {
            counts[table.sample_index(&mut rng)] += 1;
        }

        // df = 5.
        let stat = chi2(&counts, &probs, draws);
        assert!(stat < 30.0, "chi2={stat:.2} counts={counts:?}");
    }

    #[test]
    fn zero_mass_is_never_drawn() {
        let probs = [0.0, 1.0 / 12.0, 1.0 / 12.0, 3.0 / 6.0, 2.0 / 6.0, 0.0];
        let population = [1, 2, 3, 4, 5, 6];
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let out = sample_weighted_with_replacement(&population, 5_000, &probs, &mut rng)
            .expect("valid probs");
        assert_eq!(out.len(), 5_000);
        assert!(!out.contains(&1));
        assert!(!out.contains(&6));
    }

    #[test]
    fn point_mass_always_wins() {
        let table = AliasTable::new(&[0.0, 0.0, 1.0, 0.0]).expect("valid probs");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..1_000 {
            assert_eq!(table.sample_index(&mut rng), 2);
        }
    }

    #[test]
    fn rejects_bad_vectors() {
        assert!(matches!(
            AliasTable::new(&[]),
            Err(SampleError::InvalidOptionValue { option: "probs", .. })
        ));
        assert!(AliasTable::new(&[0.5, 0.6]).is_err());
        assert!(AliasTable::new(&[1.5, -0.5]).is_err());
        assert!(AliasTable::new(&[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = sample_weighted_with_replacement(&[1, 2, 3], 2, &[0.5, 0.5], &mut rng)
            .expect_err("length mismatch");
        assert!(matches!(
            err,
            SampleError::InvalidOptionValue { option: "probs", .. }
        ));
    }
}
