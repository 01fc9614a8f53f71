/// [`Bound`] type for limiting each coordinate to a closed interval.
pub mod bound;
/// [`Direction`] type for choosing between minimization and maximization.
pub mod direction;
/// [`SwarmSummary`] type for the result of a swarm optimization.
pub mod summary;
/// Random sampling helpers shared by the algorithms.
pub mod utils;

pub use bound::{Bound, Bounds};
pub use direction::Direction;
pub use summary::SwarmSummary;
