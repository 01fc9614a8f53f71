use crate::{core::utils::SampleFloat, error::ConfigurationError, DVector, Float};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Deref};

/// A closed interval `[lower, upper]` which limits one coordinate of the search space.
///
/// Unlike gradient-based minimizers, a swarm needs somewhere to scatter its particles, so every
/// [`Bound`] has two finite limits. Whether the limits are well-formed is checked by
/// [`Bounds::validate`] rather than on construction.
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bound {
    lower: Float,
    upper: Float,
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}
impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        Self::new(value.0, value.1)
    }
}
impl From<&Self> for Bound {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl Bound {
    /// Create a new [`Bound`] spanning `[lower, upper]`.
    pub const fn new(lower: Float, upper: Float) -> Self {
        Self { lower, upper }
    }
    /// Returns the lower limit.
    pub const fn lower(&self) -> Float {
        self.lower
    }
    /// Returns the upper limit.
    pub const fn upper(&self) -> Float {
        self.upper
    }
    /// Get a value in the uniform distribution between `lower` and `upper`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        rng.range(self.lower, self.upper)
    }
    /// Checks whether the given `value` lies inside the bound (limits included).
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Restricts `value` to the bound.
    pub fn clamp(&self, value: Float) -> Float {
        value.max(self.lower).min(self.upper)
    }
    /// Checks if the given value is equal to one of the limits.
    pub fn at_bound(&self, value: Float) -> bool {
        value == self.lower || value == self.upper
    }
}

/// The ordered list of [`Bound`]s, one per dimension of the search space.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// The number of dimensions covered by the bounds.
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
    /// Checks that there is at least one bound and that every bound is a finite, non-inverted
    /// interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyBounds`], [`ConfigurationError::NonFiniteBound`], or
    /// [`ConfigurationError::InvertedBound`] for the first problem found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.0.is_empty() {
            return Err(ConfigurationError::EmptyBounds);
        }
        for (index, bound) in self.0.iter().enumerate() {
            let (lower, upper) = (bound.lower(), bound.upper());
            if !lower.is_finite() || !upper.is_finite() {
                return Err(ConfigurationError::NonFiniteBound {
                    index,
                    lower,
                    upper,
                });
            }
            if lower > upper {
                return Err(ConfigurationError::InvertedBound {
                    index,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }
    /// Checks whether every coordinate of `x` lies inside its bound.
    pub fn contains(&self, x: &DVector<Float>) -> bool {
        x.len() == self.0.len() && x.iter().zip(&self.0).all(|(&xi, b)| b.contains(xi))
    }
    /// Clamps every coordinate of `x` into its bound in place.
    pub fn clamp(&self, x: &mut DVector<Float>) {
        x.iter_mut()
            .zip(&self.0)
            .for_each(|(xi, b)| *xi = b.clamp(*xi));
    }
    /// Draws a point uniformly inside the bounds, one independent draw per dimension.
    pub fn random_point(&self, rng: &mut Rng) -> DVector<Float> {
        DVector::from_iterator(self.0.len(), self.0.iter().map(|b| b.get_uniform(rng)))
    }
}

impl<B: Into<Bound>> From<Vec<B>> for Bounds {
    fn from(value: Vec<B>) -> Self {
        value.into_iter().collect()
    }
}

impl<B: Into<Bound>> FromIterator<B> for Bounds {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Deref for Bounds {
    type Target = [Bound];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self.0.iter().map(Bound::to_string).collect::<Vec<_>>();
        write!(f, "[{}]", parts.join(", "))
    }
}
