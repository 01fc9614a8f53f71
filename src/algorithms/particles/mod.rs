/// [`Particle`] type and personal-best seeding.
pub mod particle;
pub use particle::{Particle, PersonalBestInit, INITIAL_VELOCITY_LIMIT};

/// [`Swarm`] type holding the particles in evaluation order.
pub mod swarm;
pub use swarm::Swarm;

/// [`SwarmStatus`] type for the particle swarm optimizer.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;

/// Implementation of the global-best Particle Swarm Optimization (PSO) algorithm
pub mod pso;
pub use pso::{PSOConfig, MAXIMIZATION_MOMENTUM, PSO};
