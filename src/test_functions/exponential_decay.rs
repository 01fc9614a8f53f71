use crate::{traits::CostFunction, DVector, Float};
use std::convert::Infallible;

/// A Gaussian bump, usually maximized.
///
/// ```math
/// f(\vec{x}) = \exp\left(-\sum_{i=1}^n x_i^2\right)
/// ```
/// The global maximum is $`f(\vec{0}) = 1`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExponentialDecay;
impl CostFunction for ExponentialDecay {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(Float::exp(-x.norm_squared()))
    }
}
