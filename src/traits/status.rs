use std::fmt::Debug;

use serde::Serialize;

/// A trait which holds the state of an [`Algorithm`](crate::traits::Algorithm) between steps
/// and is handed to [`Observer`](crate::traits::Observer)s after each one.
pub trait Status: Clone + Default + Debug + Serialize {
    /// Returns the message describing the current condition of the algorithm.
    fn message(&self) -> &str;
    /// Sets the message describing the current condition of the algorithm.
    fn update_message(&mut self, message: &str);
}
