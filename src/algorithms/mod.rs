/// Module containing particle swarm optimization.
pub mod particles;
pub use particles::{PSOConfig, PSO};
