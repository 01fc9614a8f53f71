use crate::{traits::CostFunction, DVector, Float};
use std::convert::Infallible;

/// A spherical function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^n x_i^2
/// ```
/// The global minimum is $`f(\vec{0}) = 0`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quadratic;
impl CostFunction for Quadratic {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x.norm_squared())
    }
}
