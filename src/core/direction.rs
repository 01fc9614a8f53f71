use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::Float;

/// Whether the swarm searches for the smallest or the largest value of the cost function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Search for the minimum
    #[default]
    Minimize,
    /// Search for the maximum
    Maximize,
}

impl Direction {
    /// Converts an `is_maximization` flag into a [`Direction`].
    pub const fn from_maximization(is_maximization: bool) -> Self {
        if is_maximization {
            Self::Maximize
        } else {
            Self::Minimize
        }
    }
    /// Returns `true` when maximizing.
    pub const fn is_maximization(&self) -> bool {
        matches!(self, Self::Maximize)
    }
    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    ///
    /// Ties are never an improvement, and neither is NaN.
    pub fn is_better(&self, candidate: Float, incumbent: Float) -> bool {
        match self {
            Self::Minimize => candidate < incumbent,
            Self::Maximize => candidate > incumbent,
        }
    }
    /// The value every finite score improves upon: `+inf` when minimizing, `-inf` when
    /// maximizing.
    pub const fn worst(&self) -> Float {
        match self {
            Self::Minimize => Float::INFINITY,
            Self::Maximize => Float::NEG_INFINITY,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimize => write!(f, "Minimization"),
            Self::Maximize => write!(f, "Maximization"),
        }
    }
}
