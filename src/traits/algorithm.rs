use std::{convert::Infallible, sync::Arc};

use parking_lot::RwLock;

use crate::traits::{CostFunction, Observer, Status};

/// A trait representing an iterative optimization algorithm.
///
/// Implementors own their [`Status`] and advance it one step at a time. The provided
/// [`Algorithm::process`] method runs a fixed number of steps, which is the only form of
/// termination: there is no convergence check.
pub trait Algorithm<S: Status, U = (), E = Infallible> {
    /// A type which holds a summary of the algorithm's ending state.
    type Summary;

    /// The current [`Status`] of the algorithm.
    fn status(&self) -> &S;

    /// The number of steps [`Algorithm::process`] will run.
    fn max_steps(&self) -> usize;

    /// The main "step" of an algorithm, which is repeated [`Algorithm::max_steps`] times.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    fn step(
        &mut self,
        current_step: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), E>;

    /// Generates a new [`Algorithm::Summary`] from the current state of the [`Algorithm`].
    fn summarize(&self) -> Self::Summary;

    /// Runs [`Algorithm::step`] [`Algorithm::max_steps`] times, calling every [`Observer`] in
    /// order after each step, then returns [`Algorithm::summarize`].
    ///
    /// # Errors
    ///
    /// Returns the first `Err(E)` raised by the cost function. Anything recorded in the
    /// [`Status`] by earlier steps is kept.
    fn process(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        observers: &[Arc<RwLock<dyn Observer<S, U>>>],
    ) -> Result<Self::Summary, E>
    where
        Self: Sized,
    {
        for current_step in 0..self.max_steps() {
            self.step(current_step, func, user_data)?;
            for observer in observers {
                observer
                    .write()
                    .observe(current_step, self.status(), user_data);
            }
        }
        Ok(self.summarize())
    }
}
