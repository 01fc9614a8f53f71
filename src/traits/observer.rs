use super::Status;

/// A trait which holds an [`observe`](`Observer::observe`) method that can be used to watch an
/// [`Algorithm`](`crate::traits::Algorithm`)'s [`Status`] during a run.
///
/// Observers can only look: they are called after every step and cannot end a run early.
pub trait Observer<S: Status, U> {
    /// A function that is called after every step of an [`Algorithm`](`crate::traits::Algorithm`).
    fn observe(&mut self, step: usize, status: &S, user_data: &U);
}
