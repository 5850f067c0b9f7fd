//! Error taxonomy for sampler construction and draws.

/// Errors raised by [`Sampler`](crate::Sampler) construction and calls.
///
/// Validation always happens before a fixed pool is touched, so an error
/// never leaves a sampler half-mutated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// A population argument is missing or unusable for the requested call shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An options value is not an options object.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A recognized option carries a value of the wrong type or outside its domain.
    #[error("invalid option `{option}`: {reason}")]
    InvalidOptionValue {
        /// The option name.
        option: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Sampling without replacement asked for more elements than are available.
    #[error(
        "sample size {size} exceeds population size {population} when sampling without replacement"
    )]
    SizeExceedsPopulation {
        /// The requested sample size.
        size: usize,
        /// The number of elements available.
        population: usize,
    },
}

impl SampleError {
    pub(crate) fn option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOptionValue {
            option,
            reason: reason.into(),
        }
    }
}

/// Result alias for sampler operations.
pub type Result<T> = core::result::Result<T, SampleError>;
