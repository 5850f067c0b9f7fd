//! The sampler factory.
//!
//! A [`Sampler`] binds a [`Config`], a [`UniformSource`] and optionally a fixed
//! pool. Each call resolves its effective options and dispatches:
//!
//! | `probs` | `replace` | algorithm |
//! |---------|-----------|-----------|
//! | none    | true      | [`uniform`](crate::uniform) |
//! | none    | false     | [`shuffle`](crate::shuffle) |
//! | given   | true      | [`alias`](crate::alias) |
//! | given   | false     | [`renormalize`](crate::renormalize) |
//!
//! ## Fixed pools
//!
//! A pool drawn from without replacement while `mutate` is set loses the drawn
//! elements for good: the pool is shuffled in place and its prefix is removed.
//! Once it is empty every call returns `Ok(None)`. Without `mutate`, draws work
//! on a throwaway copy and the pool never changes.

use crate::alias;
use crate::error::{Result, SampleError};
use crate::options::{validate_probs, Config, Options, Resolved};
use crate::renormalize;
use crate::shuffle;
use crate::source::UniformSource;
use crate::uniform;

/// The two call shapes a sampler accepts.
#[derive(Debug, Clone, Copy)]
pub enum Call<'a, T> {
    /// Sample from an ad-hoc population. Only valid without a fixed pool.
    WithPopulation(&'a [T], Option<&'a Options>),
    /// Sample from the fixed pool bound at construction.
    BoundDefaults(Option<&'a Options>),
}

/// A reusable, seeded sampling function.
///
/// # Examples
///
/// ```
/// use tsubo::{Config, Options, Sampler};
///
/// let mut sampler = Sampler::with_population(
///     vec![1, 2, 3, 4, 5, 6],
///     Config::new().with_replace(false).with_mutate(true).with_seed(329),
/// )?;
///
/// let options = Options::new().with_size(3);
/// let first = sampler.draw_with(&options)?.expect("pool has six elements");
/// let second = sampler.draw_with(&options)?.expect("pool has three elements");
/// assert_eq!(first.len() + second.len(), 6);
/// assert_eq!(sampler.draw()?, None);
/// # Ok::<(), tsubo::SampleError>(())
/// ```
#[derive(Debug)]
pub struct Sampler<T> {
    pool: Option<Vec<T>>,
    defaults: Config,
    source: UniformSource,
}

impl<T: Clone> Sampler<T> {
    /// A sampler that draws from populations supplied per call.
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidOptionValue`] if the configured seed is zero.
    pub fn new(config: Config) -> Result<Self> {
        let source = seeded_source(&config)?;
        Ok(Self::build(None, config, source))
    }

    /// A sampler that owns `population` as its fixed pool.
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidOptionValue`] if the configured seed is zero.
    pub fn with_population(population: impl Into<Vec<T>>, config: Config) -> Result<Self> {
        let source = seeded_source(&config)?;
        Ok(Self::build(Some(population.into()), config, source))
    }

    /// A sampler over a caller-supplied generator.
    ///
    /// `config.seed` is ignored: the sampler reports the source's own seed.
    pub fn with_source(population: Option<Vec<T>>, config: Config, source: UniformSource) -> Self {
        Self::build(population, config, source)
    }

    fn build(pool: Option<Vec<T>>, config: Config, source: UniformSource) -> Self {
        trace_info!(
            seed = source.seed(),
            pool = pool.as_ref().map(Vec::len),
            replace = config.replace,
            mutate = config.mutate,
            size = config.size,
            "sampler created"
        );
        Self {
            pool,
            defaults: config,
            source,
        }
    }

    /// Seed of the underlying generator.
    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// The underlying generator.
    pub fn source(&self) -> &UniformSource {
        &self.source
    }

    /// Defaults bound at construction.
    pub fn defaults(&self) -> &Config {
        &self.defaults
    }

    /// The fixed pool as it stands now, if one is bound.
    pub fn pool(&self) -> Option<&[T]> {
        self.pool.as_deref()
    }

    /// Run one call.
    ///
    /// Returns `Ok(None)` only when the fixed pool is empty.
    ///
    /// # Errors
    ///
    /// - [`SampleError::InvalidArgument`] if the call shape does not match the sampler
    ///   (ad-hoc population on a fixed-pool sampler or vice versa), or if a non-empty
    ///   sample is requested with replacement from an empty population.
    /// - [`SampleError::InvalidOptionValue`] if `probs` is not a probability vector
    ///   over the population.
    /// - [`SampleError::SizeExceedsPopulation`] if sampling without replacement asks
    ///   for more elements than are available.
    pub fn call(&mut self, call: Call<'_, T>) -> Result<Option<Vec<T>>> {
        match call {
            Call::WithPopulation(population, options) => {
                if self.pool.is_some() {
                    return Err(SampleError::InvalidArgument(
                        "sampler owns a fixed population; call it without one".into(),
                    ));
                }
                let resolved = self.defaults.resolve(options, population.len());
                dispatch(population, &resolved, &mut self.source).map(Some)
            }
            Call::BoundDefaults(options) => self.draw_fixed(options),
        }
    }

    /// Sample from `population` using the bound defaults.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub fn sample(&mut self, population: &[T]) -> Result<Vec<T>> {
        self.sample_inner(population, None)
    }

    /// Sample from `population` with per-call overrides.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub fn sample_with(&mut self, population: &[T], options: &Options) -> Result<Vec<T>> {
        self.sample_inner(population, Some(options))
    }

    fn sample_inner(&mut self, population: &[T], options: Option<&Options>) -> Result<Vec<T>> {
        Ok(self
            .call(Call::WithPopulation(population, options))?
            .unwrap_or_default())
    }

    /// Sample from the fixed pool using the bound defaults.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub fn draw(&mut self) -> Result<Option<Vec<T>>> {
        self.call(Call::BoundDefaults(None))
    }

    /// Sample from the fixed pool with per-call overrides.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub fn draw_with(&mut self, options: &Options) -> Result<Option<Vec<T>>> {
        self.call(Call::BoundDefaults(Some(options)))
    }

    fn draw_fixed(&mut self, options: Option<&Options>) -> Result<Option<Vec<T>>> {
        let Some(pool) = self.pool.as_mut() else {
            return Err(SampleError::InvalidArgument(
                "no fixed population is bound; pass a population".into(),
            ));
        };
        if pool.is_empty() {
            trace_debug!("fixed pool exhausted");
            return Ok(None);
        }

        let resolved = self.defaults.resolve(options, pool.len());
        if resolved.replace || !resolved.mutate {
            return dispatch(pool, &resolved, &mut self.source).map(Some);
        }

        let out = match resolved.probs {
            None => shuffle::sample_in_place(pool, resolved.size, &mut self.source)?,
            Some(probs) => {
                validate_probs(probs, pool.len())?;
                let picked =
                    renormalize::renormalized_indices(probs, resolved.size, &mut self.source)?;
                take_indices(pool, &picked)
            }
        };
        trace_debug!(
            drawn = out.len(),
            remaining = pool.len(),
            "fixed pool shrunk"
        );
        Ok(Some(out))
    }
}

impl Sampler<char> {
    /// A sampler whose fixed pool is the characters of `s`.
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidOptionValue`] if the configured seed is zero.
    pub fn from_chars(s: &str, config: Config) -> Result<Self> {
        Self::with_population(s.chars().collect::<Vec<_>>(), config)
    }
}

fn seeded_source(config: &Config) -> Result<UniformSource> {
    config.validate()?;
    Ok(match config.seed {
        Some(seed) => UniformSource::seeded(seed),
        None => UniformSource::from_entropy(),
    })
}

fn dispatch<T: Clone>(
    population: &[T],
    resolved: &Resolved<'_>,
    source: &mut UniformSource,
) -> Result<Vec<T>> {
    let size = resolved.size;
    match (resolved.probs, resolved.replace) {
        (Some(probs), true) => {
            trace_debug!(size, population = population.len(), "alias draw");
            alias::sample_weighted_with_replacement(population, size, probs, source)
        }
        (Some(probs), false) => {
            trace_debug!(size, population = population.len(), "renormalizing draw");
            renormalize::sample_weighted_without_replacement(population, size, probs, source)
        }
        (None, true) => {
            trace_debug!(size, population = population.len(), "uniform draw");
            uniform::sample_with_replacement(population, size, source)
        }
        (None, false) => {
            trace_debug!(size, population = population.len(), "fisher-yates draw");
            shuffle::sample_without_replacement(population, size, source)
        }
    }
}

/// Remove the elements at `indices` from `pool`, returned in `indices` order.
fn take_indices<T>(pool: &mut Vec<T>, indices: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = pool.drain(..).map(Some).collect();
    let out = indices.iter().filter_map(|&i| slots[i].take()).collect();
    pool.extend(slots.into_iter().flatten());
    out
}
