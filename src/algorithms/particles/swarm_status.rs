use crate::{algorithms::particles::Swarm, traits::Status, DVector, Float};
use serde::{Deserialize, Serialize};

/// The state of a particle swarm optimization, including its recorded trajectory.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The swarm
    pub swarm: Swarm,
    /// The best position found by any particle so far
    pub global_best_position: DVector<Float>,
    /// The score at [`SwarmStatus::global_best_position`]
    pub global_best_score: Float,
    /// Every particle's position after each iteration, indexed `[iteration][particle]`
    pub history: Vec<Vec<DVector<Float>>>,
    /// The global best position after each iteration
    pub best_positions_per_iteration: Vec<DVector<Float>>,
    /// The number of function evaluations
    pub n_f_evals: usize,
    /// A message containing information about the condition of the swarm
    pub message: String,
}

impl SwarmStatus {
    /// The number of iterations recorded so far.
    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

impl Status for SwarmStatus {
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}
