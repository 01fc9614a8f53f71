use thiserror::Error;

use crate::Float;

/// Errors raised while validating a swarm configuration, before any random draws are made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// No bounds were given, so the search space has no dimensions.
    #[error("at least one bound is required to define the search space")]
    EmptyBounds,

    /// A bound's lower limit exceeds its upper limit.
    #[error("bound #{index} is inverted: lower = {lower} > upper = {upper}")]
    InvertedBound {
        /// The dimension of the offending bound
        index: usize,
        /// The lower limit
        lower: Float,
        /// The upper limit
        upper: Float,
    },

    /// A bound has a NaN or infinite limit, so positions cannot be drawn uniformly inside it.
    #[error("bound #{index} = ({lower}, {upper}) is not finite")]
    NonFiniteBound {
        /// The dimension of the offending bound
        index: usize,
        /// The lower limit
        lower: Float,
        /// The upper limit
        upper: Float,
    },

    /// The swarm was configured with zero particles.
    #[error("the swarm needs at least one particle")]
    NoParticles,
}

/// Returned when a predefined objective is requested by a name that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown objective function \"{0}\"")]
pub struct UnknownFunctionError(pub String);
