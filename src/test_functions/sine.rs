use crate::{traits::CostFunction, DVector, Float};
use std::convert::Infallible;

/// A separable periodic function.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^n \sin(x_i)
/// ```
/// It has no global extremum on $`\mathbb{R}^n`$, only the bounds make the search well-posed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sine;
impl CostFunction for Sine {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x.iter().map(|xi| xi.sin()).sum())
    }
}
