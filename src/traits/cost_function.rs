use std::convert::Infallible;

use crate::{DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take a `user_data: &mut U` field which can be used to pass external
/// arguments to the function during optimization, or can be modified by the function itself.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution. Closures of the form `Fn(&DVector<Float>) -> Result<Float, E>` implement
/// `CostFunction<(), E>` directly:
///
/// ```rust
/// use std::convert::Infallible;
/// use swarmopt::{traits::CostFunction, DVector, Float};
///
/// let f = |x: &DVector<Float>| -> Result<Float, Infallible> { Ok(x.norm_squared()) };
/// assert_eq!(f.evaluate(&DVector::from_vec(vec![1.0, 2.0]), &mut ()).unwrap(), 5.0);
/// ```
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DVector<Float>, user_data: &mut U) -> Result<Float, E>;
}

impl<F, E> CostFunction<(), E> for F
where
    F: Fn(&DVector<Float>) -> Result<Float, E>,
{
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, E> {
        self(x)
    }
}
