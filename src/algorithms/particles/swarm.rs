use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{Particle, PersonalBestInit},
    core::{Bounds, Direction},
    DVector, Float,
};

/// A swarm of particles sharing one set of bounds.
///
/// The order of [`Swarm::particles`] is the order in which they are evaluated and moved in every
/// iteration, which matters because each particle sees the global best left by the ones before
/// it.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Swarm {
    /// The bounds every particle is clamped to
    pub bounds: Bounds,
    /// A list of the particles in the swarm
    pub particles: Vec<Particle>,
}

impl Swarm {
    /// Create `n_particles` particles, one after another, using [`Particle::new`].
    ///
    /// Personal-best scores are then seeded according to `personal_best_init`.
    pub fn new(
        bounds: Bounds,
        n_particles: usize,
        personal_best_init: PersonalBestInit,
        direction: Direction,
        rng: &mut Rng,
    ) -> Self {
        let seed = personal_best_init.seed(direction);
        let particles = (0..n_particles)
            .map(|_| {
                let mut particle = Particle::new(&bounds, rng);
                particle.best_score = seed;
                particle
            })
            .collect();
        Self { bounds, particles }
    }
    /// The number of particles in the swarm.
    pub fn len(&self) -> usize {
        self.particles.len()
    }
    /// Returns `true` if the swarm has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
    /// The dimension of the search space.
    pub fn dimension(&self) -> usize {
        self.bounds.dimension()
    }
    /// A copy of every particle's current position, in swarm order.
    pub fn positions(&self) -> Vec<DVector<Float>> {
        self.particles.iter().map(|p| p.position.clone()).collect()
    }
}
