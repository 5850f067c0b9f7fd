//! `tsubo`: reproducible sampling from finite populations.
//!
//! A [`Sampler`] binds a seeded [`UniformSource`], default options and optionally
//! a fixed pool, then draws samples of a requested size with or without
//! replacement, under uniform or per-element probabilities.
//!
//! Exposed modules:
//! - `uniform`: uniform draws with replacement.
//! - `shuffle`: Fisher-Yates draws without replacement (copying or in place).
//! - `alias`: Vose's alias method for weighted draws with replacement.
//! - `renormalize`: sequential weighted draws without replacement.
//! - `source`: the seeded generator every sampler owns.
//! - `options`: bound defaults, per-call overrides and their validation.
//!
//! The draw functions take any `R: rand::Rng + ?Sized`, so they can be used on
//! their own with a caller-supplied generator.
//!
//! ## Features
//!
//! - `tracing` (default): structured `tracing` events on construction and per draw.
//! - `serde` (default): `Serialize`/`Deserialize` on [`Config`]/[`Options`] and
//!   `from_json` readers for loosely-typed option objects.

#![forbid(unsafe_code)]

#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod alias;
mod error;
pub mod options;
pub mod renormalize;
mod sampler;
pub mod shuffle;
pub mod source;
pub mod uniform;

pub use alias::{sample_weighted_with_replacement, AliasTable};
pub use error::{Result, SampleError};
pub use options::{Config, Options, Resolved};
pub use renormalize::sample_weighted_without_replacement;
pub use sampler::{Call, Sampler};
pub use shuffle::{fisher_yates, sample_without_replacement};
pub use source::UniformSource;
pub use uniform::sample_with_replacement;
