//! Sampler configuration and per-call overrides.
//!
//! A [`Config`] is captured once when a [`Sampler`](crate::Sampler) is built. Each
//! call may carry [`Options`] that override it; the two are merged into a
//! [`Resolved`] value (call site first, then bound defaults). The seed is only
//! read at construction.

use crate::error::{Result, SampleError};

/// Allowed distance between a probability vector's sum and one (`sqrt(f64::EPSILON)`).
pub const PROBABILITY_TOLERANCE: f64 = 1.490_116_119_384_765_6e-8;

/// Check that `probs` is a probability vector over `len` elements.
///
/// # Errors
///
/// [`SampleError::InvalidOptionValue`] for `probs` when the length differs from
/// `len`, an entry is negative or not finite, or the entries do not sum to one.
pub fn validate_probs(probs: &[f64], len: usize) -> Result<()> {
    if probs.len() != len {
        return Err(SampleError::option(
            "probs",
            format!("expected {len} probabilities, got {}", probs.len()),
        ));
    }
    if let Some((i, &p)) = probs
        .iter()
        .enumerate()
        .find(|&(_, &p)| !p.is_finite() || p < 0.0)
    {
        return Err(SampleError::option(
            "probs",
            format!("entry {i} must be a finite non-negative number (got {p})"),
        ));
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(SampleError::option(
            "probs",
            format!("probabilities must sum to one (got {sum})"),
        ));
    }
    Ok(())
}

/// Defaults bound to a sampler at construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Default sample size. `None` means the population (or pool) length.
    pub size: Option<usize>,
    /// Sample with replacement.
    pub replace: bool,
    /// Permanently remove drawn elements from a fixed pool when sampling without replacement.
    pub mutate: bool,
    /// Generator seed. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: None,
            replace: true,
            mutate: false,
            seed: None,
        }
    }
}

impl Config {
    /// Create defaults: sample with replacement, no mutation, fresh seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default sample size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the default replacement strategy.
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Set the default pool mutation strategy.
    pub fn with_mutate(mut self, mutate: bool) -> Self {
        self.mutate = mutate;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.seed == Some(0) {
            return Err(SampleError::option("seed", "must be a positive integer"));
        }
        Ok(())
    }

    /// Merge per-call overrides over these defaults for a population of `len` elements.
    pub fn resolve<'a>(&self, options: Option<&'a Options>, len: usize) -> Resolved<'a> {
        Resolved {
            size: options
                .and_then(|o| o.size)
                .or(self.size)
                .unwrap_or(len),
            replace: options.and_then(|o| o.replace).unwrap_or(self.replace),
            mutate: options.and_then(|o| o.mutate).unwrap_or(self.mutate),
            probs: options.and_then(|o| o.probs.as_deref()),
        }
    }
}

/// Per-call overrides. Unset fields fall back to the sampler's [`Config`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Sample size for this call.
    pub size: Option<usize>,
    /// Per-element probabilities; must match the population length and sum to one.
    pub probs: Option<Vec<f64>>,
    /// Replacement strategy for this call.
    pub replace: Option<bool>,
    /// Pool mutation strategy for this call.
    pub mutate: Option<bool>,
}

impl Options {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the sample size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Draw under per-element probabilities.
    pub fn with_probs(mut self, probs: impl Into<Vec<f64>>) -> Self {
        self.probs = Some(probs.into());
        self
    }

    /// Override the replacement strategy.
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = Some(replace);
        self
    }

    /// Override the pool mutation strategy.
    pub fn with_mutate(mut self, mutate: bool) -> Self {
        self.mutate = Some(mutate);
        self
    }
}

/// Effective options for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    /// Number of elements to draw.
    pub size: usize,
    /// Sample with replacement.
    pub replace: bool,
    /// Remove drawn elements from a fixed pool.
    pub mutate: bool,
    /// Per-element probabilities, if any.
    pub probs: Option<&'a [f64]>,
}

#[cfg(feature = "serde")]
mod json {
    use serde_json::{Map, Value};

    use super::{validate_probs, Config, Options};
    use crate::error::{Result, SampleError};

    fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    fn object(value: &Value) -> Result<&Map<String, Value>> {
        value.as_object().ok_or_else(|| {
            SampleError::InvalidOptions(format!("expected an object, got {}", kind(value)))
        })
    }

    fn size(map: &Map<String, Value>) -> Result<Option<usize>> {
        map.get("size")
            .map(|v| {
                v.as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        SampleError::option(
                            "size",
                            format!("must be a non-negative integer (got {})", kind(v)),
                        )
                    })
            })
            .transpose()
    }

    fn flag(map: &Map<String, Value>, name: &'static str) -> Result<Option<bool>> {
        map.get(name)
            .map(|v| {
                v.as_bool().ok_or_else(|| {
                    SampleError::option(name, format!("must be a boolean (got {})", kind(v)))
                })
            })
            .transpose()
    }

    impl Config {
        /// Read defaults from a loosely-typed options object.
        ///
        /// Recognized keys are `size`, `replace`, `mutate` and `seed`; anything
        /// else is ignored.
        ///
        /// # Errors
        ///
        /// [`SampleError::InvalidOptions`] if `value` is not an object,
        /// [`SampleError::InvalidOptionValue`] if a recognized key has a bad value.
        pub fn from_json(value: &Value) -> Result<Self> {
            let map = object(value)?;
            let defaults = Self::default();
            let seed = map
                .get("seed")
                .map(|v| {
                    v.as_u64().filter(|&s| s > 0).ok_or_else(|| {
                        SampleError::option("seed", "must be a positive integer")
                    })
                })
                .transpose()?;
            Ok(Self {
                size: size(map)?,
                replace: flag(map, "replace")?.unwrap_or(defaults.replace),
                mutate: flag(map, "mutate")?.unwrap_or(defaults.mutate),
                seed,
            })
        }
    }

    impl Options {
        /// Read per-call overrides from a loosely-typed options object.
        ///
        /// Recognized keys are `size`, `probs`, `replace` and `mutate`; anything
        /// else is ignored.
        ///
        /// # Errors
        ///
        /// [`SampleError::InvalidOptions`] if `value` is not an object,
        /// [`SampleError::InvalidOptionValue`] if a recognized key has a bad value.
        pub fn from_json(value: &Value) -> Result<Self> {
            let map = object(value)?;
            let probs = map
                .get("probs")
                .map(|v| -> Result<Vec<f64>> {
                    let entries = v.as_array().ok_or_else(|| {
                        SampleError::option("probs", format!("must be an array (got {})", kind(v)))
                    })?;
                    let probs = entries
                        .iter()
                        .map(|e| {
                            e.as_f64().ok_or_else(|| {
                                SampleError::option(
                                    "probs",
                                    format!("entries must be numbers (got {})", kind(e)),
                                )
                            })
                        })
                        .collect::<Result<Vec<f64>>>()?;
                    validate_probs(&probs, probs.len())?;
                    Ok(probs)
                })
                .transpose()?;
            Ok(Self {
                size: size(map)?,
                probs,
                replace: flag(map, "replace")?,
                mutate: flag(map, "mutate")?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_site_overrides_defaults() {
        let config = Config::new().with_size(3).with_replace(false);
        let r = config.resolve(None, 6);
        assert_eq!((r.size, r.replace, r.mutate), (3, false, false));

        let options = Options::new().with_replace(true).with_mutate(true);
        let r = config.resolve(Some(&options), 6);
        assert_eq!((r.size, r.replace, r.mutate), (3, true, true));

        let options = Options::new().with_size(5).with_probs(vec![0.5, 0.5]);
        let r = config.resolve(Some(&options), 6);
        assert_eq!(r.size, 5);
        assert_eq!(r.probs, Some(&[0.5, 0.5][..]));
    }

    #[test]
    fn size_defaults_to_population_length() {
        assert_eq!(Config::new().resolve(None, 7).size, 7);
        assert_eq!(Config::new().resolve(Some(&Options::new()), 0).size, 0);
    }

    #[test]
    fn zero_seed_is_rejected() {
        assert!(Config::new().with_seed(1).validate().is_ok());
        assert!(matches!(
            Config::new().with_seed(0).validate(),
            Err(SampleError::InvalidOptionValue { option: "seed", .. })
        ));
    }

    #[test]
    fn probability_vectors_are_checked() {
        assert!(validate_probs(&[0.5, 0.2, 0.2, 0.1], 4).is_ok());
        assert!(validate_probs(&[1.0 / 3.0; 3], 3).is_ok());
        assert!(validate_probs(&[0.5, 0.5], 3).is_err());
        assert!(validate_probs(&[0.5, 0.6], 2).is_err());
        assert!(validate_probs(&[1.5, -0.5], 2).is_err());
        assert!(validate_probs(&[f64::INFINITY, 0.0], 2).is_err());
        assert!(validate_probs(&[], 0).is_err());
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::*;
        use serde_json::json;

        #[test]
        fn config_reads_recognized_keys_and_ignores_others() {
            let config = Config::from_json(&json!({
                "size": 3,
                "replace": false,
                "seed": 223,
                "beep": "boop"
            }))
            .expect("valid config");
            assert_eq!(
                config,
                Config::new().with_size(3).with_replace(false).with_seed(223)
            );
        }

        #[test]
        fn non_objects_are_invalid_options() {
            for value in [json!(null), json!(5), json!("abc"), json!([1, 2]), json!(true)] {
                assert!(
                    matches!(Config::from_json(&value), Err(SampleError::InvalidOptions(_))),
                    "accepted {value}"
                );
                assert!(
                    matches!(Options::from_json(&value), Err(SampleError::InvalidOptions(_))),
                    "accepted {value}"
                );
            }
        }

        #[test]
        fn wrong_types_are_invalid_option_values() {
            let cases = [
                (json!({ "size": -1 }), "size"),
                (json!({ "size": 1.5 }), "size"),
                (json!({ "size": "3" }), "size"),
                (json!({ "replace": "yes" }), "replace"),
                (json!({ "mutate": 1 }), "mutate"),
                (json!({ "probs": "abc" }), "probs"),
                (json!({ "probs": [0.5, "0.5"] }), "probs"),
                (json!({ "probs": [0.5, 0.6] }), "probs"),
            ];
            for (value, name) in cases {
                match Options::from_json(&value) {
                    Err(SampleError::InvalidOptionValue { option, .. }) => assert_eq!(option, name),
                    other => panic!("{value}: unexpected {other:?}"),
                }
            }
            assert!(matches!(
                Config::from_json(&json!({ "seed": 0 })),
                Err(SampleError::InvalidOptionValue { option: "seed", .. })
            ));
        }

        #[test]
        fn options_round_trip_probs() {
            let options = Options::from_json(&json!({
                "size": 4,
                "probs": [0.5, 0.2, 0.2, 0.1],
                "replace": false
            }))
            .expect("valid options");
            assert_eq!(
                options,
                Options::new()
                    .with_size(4)
                    .with_probs(vec![0.5, 0.2, 0.2, 0.1])
                    .with_replace(false)
            );
        }

        #[test]
        fn config_deserializes_with_defaults() {
            let config: Config = serde_json::from_value(json!({ "mutate": true }))
                .expect("deserializes");
            assert_eq!(config, Config::new().with_mutate(true));
        }
    }
}
