use crate::{traits::CostFunction, DVector, Float, E, PI};
use std::convert::Infallible;

/// The Ackley function, a nearly flat outer region with a deep hole at the center.
///
/// ```math
/// f(\vec{x}) = -20\exp\left(-0.2\sqrt{\frac{1}{n}\sum_{i=1}^n x_i^2}\right)
///   - \exp\left(\frac{1}{n}\sum_{i=1}^n \cos(2\pi x_i)\right) + e + 20
/// ```
/// where $`x_i \in [-5, 5]`$. The global minimum is $`f(\vec{0}) = 0`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ackley;
impl CostFunction for Ackley {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        let n = x.len() as Float;
        let mean_square = x.norm_squared() / n;
        let mean_cos = x.iter().map(|xi| Float::cos(2.0 * PI * xi)).sum::<Float>() / n;
        Ok(-20.0 * Float::exp(-0.2 * mean_square.sqrt()) - mean_cos.exp() + E + 20.0)
    }
}
