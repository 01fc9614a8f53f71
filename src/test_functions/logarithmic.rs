use crate::{traits::CostFunction, DVector, Float};
use std::convert::Infallible;

/// A slowly-growing bowl.
///
/// ```math
/// f(\vec{x}) = \ln\left(1 + \sum_{i=1}^n x_i^2\right)
/// ```
/// The global minimum is $`f(\vec{0}) = 0`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logarithmic;
impl CostFunction for Logarithmic {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x.norm_squared().ln_1p())
    }
}
