use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    core::{utils::generate_random_vector, Bounds, Direction},
    DVector, Float,
};

/// The half-width of the interval initial velocities are drawn from.
pub const INITIAL_VELOCITY_LIMIT: Float = 0.1;

/// How a particle's personal-best score is seeded before its first evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalBestInit {
    /// Seed with `+inf` in either direction.
    ///
    /// While maximizing no finite score is greater than `+inf`, so personal bests stay at the
    /// particles' starting positions for the whole run.
    #[default]
    Infinity,
    /// Seed with [`Direction::worst`], so the first evaluation always becomes the personal best.
    Worst,
}

impl PersonalBestInit {
    /// The initial personal-best score for the given [`Direction`].
    pub const fn seed(&self, direction: Direction) -> Float {
        match self {
            Self::Infinity => Float::INFINITY,
            Self::Worst => direction.worst(),
        }
    }
}

/// A single candidate solution in a swarm.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Particle {
    /// The current position, always inside the swarm's bounds
    pub position: DVector<Float>,
    /// The current velocity, which is never clamped to the bounds
    pub velocity: DVector<Float>,
    /// The position at which [`Particle::best_score`] was achieved
    pub best_position: DVector<Float>,
    /// The best score this particle has produced so far
    pub best_score: Float,
}

impl Particle {
    /// Create a particle at a uniformly random position inside `bounds`, with each velocity
    /// component drawn uniformly from `[-INITIAL_VELOCITY_LIMIT, INITIAL_VELOCITY_LIMIT)`.
    ///
    /// The personal best starts as a copy of the position with a score of `+inf`.
    pub fn new(bounds: &Bounds, rng: &mut Rng) -> Self {
        let position = bounds.random_point(rng);
        let velocity = generate_random_vector(
            bounds.dimension(),
            -INITIAL_VELOCITY_LIMIT,
            INITIAL_VELOCITY_LIMIT,
            rng,
        );
        Self {
            best_position: position.clone(),
            position,
            velocity,
            best_score: Float::INFINITY,
        }
    }
    /// The dimension of the particle's position.
    pub fn dimension(&self) -> usize {
        self.position.len()
    }
    /// Records `score` as the personal best if it improves on [`Particle::best_score`].
    ///
    /// Returns `true` if the personal best changed.
    pub fn update_best(&mut self, score: Float, direction: Direction) -> bool {
        if direction.is_better(score, self.best_score) {
            self.best_score = score;
            self.best_position = self.position.clone();
            true
        } else {
            false
        }
    }
}
