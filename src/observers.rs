use std::{fmt::Debug, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    algorithms::particles::SwarmStatus,
    traits::{Observer, Status},
    Float,
};

/// A debugging observer which logs the step, status, and any user data at the `debug` level after
/// each step of an algorithm.
///
/// # Usage:
///
/// ```rust
/// use fastrand::Rng;
/// use swarmopt::prelude::*;
/// use swarmopt::observers::DebugObserver;
/// use swarmopt::test_functions::Rastrigin;
///
/// let config = PSOConfig::new(vec![(-5.12, 5.12); 2]).with_max_iterations(5);
/// let mut pso = PSO::new(config, Rng::with_seed(0)).unwrap();
/// let obs = DebugObserver::build();
/// pso.optimize_with_observers(&Rastrigin, &mut (), &[obs]).unwrap();
/// // ^ This will log a message for each step if a subscriber is installed
/// ```
pub struct DebugObserver;

impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}

impl<S: Status, U: Debug> Observer<S, U> for DebugObserver {
    fn observe(&mut self, step: usize, status: &S, user_data: &U) {
        debug!(step, ?status, ?user_data, "observed step");
    }
}

/// An observer which records the global best score after every iteration of a swarm, which is
/// enough to plot a convergence curve.
#[derive(Default, Clone, Debug)]
pub struct BestScoreObserver {
    /// The global best score after each observed iteration
    pub scores: Vec<Float>,
}

impl BestScoreObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<U> Observer<SwarmStatus, U> for BestScoreObserver {
    fn observe(&mut self, _step: usize, status: &SwarmStatus, _user_data: &U) {
        self.scores.push(status.global_best_score);
    }
}
