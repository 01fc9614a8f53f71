use std::sync::Arc;

use fastrand::Rng;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    algorithms::particles::{Particle, PersonalBestInit, Swarm, SwarmStatus},
    core::{utils::generate_unit_vector, Bound, Bounds, Direction, SwarmSummary},
    error::ConfigurationError,
    traits::{Algorithm, CostFunction, Observer, Status},
    DVector, Float,
};

/// The fraction of a particle's previous velocity added on top of the inertia term while
/// maximizing.
pub const MAXIMIZATION_MOMENTUM: Float = 0.01;

/// The configuration struct for the [`PSO`] algorithm.
///
/// Every field has a default, so a partial configuration can be deserialized with `serde`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PSOConfig {
    /// The search space (no default dimensions; must be set)
    pub bounds: Bounds,
    /// The number of particles in the swarm (default = `30`)
    pub n_particles: usize,
    /// The exact number of iterations to run (default = `50`)
    pub max_iterations: usize,
    /// Whether to minimize or maximize (default = [`Direction::Minimize`])
    pub direction: Direction,
    /// The inertial weight $`\omega`$ (default = `0.6`)
    pub inertia: Float,
    /// The cognitive weight $`c_1`$ pulling particles towards their personal best
    /// (default = `0.5`)
    pub cognitive: Float,
    /// The social weight $`c_2`$ pulling particles towards the global best (default = `2.0`)
    pub social: Float,
    /// The velocity cap, only applied when [`PSOConfig::clamp_velocity`] is set
    /// (default = `2.0`)
    pub max_velocity: Float,
    /// Clamp each velocity component to `[-max_velocity, max_velocity]` after every update
    /// (default = `false`)
    pub clamp_velocity: bool,
    /// How personal-best scores are seeded (default = [`PersonalBestInit::Infinity`])
    pub personal_best_init: PersonalBestInit,
    /// Optional parameter names used when printing a [`SwarmSummary`]
    pub parameter_names: Option<Vec<String>>,
}

impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            n_particles: 30,
            max_iterations: 50,
            direction: Direction::Minimize,
            inertia: 0.6,
            cognitive: 0.5,
            social: 2.0,
            max_velocity: 2.0,
            clamp_velocity: false,
            personal_best_init: PersonalBestInit::Infinity,
            parameter_names: None,
        }
    }
}

impl PSOConfig {
    /// Create a default configuration over the given bounds.
    pub fn new<I: IntoIterator<Item = B>, B: Into<Bound>>(bounds: I) -> Self {
        Self {
            bounds: bounds.into_iter().collect(),
            ..Default::default()
        }
    }
    /// Replace the bounds of the search space.
    pub fn with_bounds<I: IntoIterator<Item = B>, B: Into<Bound>>(mut self, bounds: I) -> Self {
        self.bounds = bounds.into_iter().collect();
        self
    }
    /// Sets the number of particles in the swarm.
    pub const fn with_n_particles(mut self, value: usize) -> Self {
        self.n_particles = value;
        self
    }
    /// Sets the number of iterations to run.
    pub const fn with_max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = value;
        self
    }
    /// Sets the optimization [`Direction`].
    pub const fn with_direction(mut self, value: Direction) -> Self {
        self.direction = value;
        self
    }
    /// Maximize if `is_maximization` is `true`, otherwise minimize.
    pub const fn with_maximization(mut self, is_maximization: bool) -> Self {
        self.direction = Direction::from_maximization(is_maximization);
        self
    }
    /// Sets the inertial weight $`\omega`$.
    pub const fn with_inertia(mut self, value: Float) -> Self {
        self.inertia = value;
        self
    }
    /// Sets the cognitive weight $`c_1`$.
    pub const fn with_cognitive(mut self, value: Float) -> Self {
        self.cognitive = value;
        self
    }
    /// Sets the social weight $`c_2`$.
    pub const fn with_social(mut self, value: Float) -> Self {
        self.social = value;
        self
    }
    /// Sets the velocity cap. It has no effect unless velocity clamping is enabled with
    /// [`PSOConfig::with_velocity_clamping`].
    pub const fn with_max_velocity(mut self, value: Float) -> Self {
        self.max_velocity = value;
        self
    }
    /// Enable or disable clamping velocities to `[-max_velocity, max_velocity]`.
    pub const fn with_velocity_clamping(mut self, value: bool) -> Self {
        self.clamp_velocity = value;
        self
    }
    /// Sets how personal-best scores are seeded.
    pub const fn with_personal_best_init(mut self, value: PersonalBestInit) -> Self {
        self.personal_best_init = value;
        self
    }
    /// Sets the names of the parameters. This is only used for printing.
    pub fn with_parameter_names<I: IntoIterator<Item = String>>(mut self, names: I) -> Self {
        self.parameter_names = Some(names.into_iter().collect());
        self
    }
    /// Checks the bounds and the particle count.
    ///
    /// The weights are not checked; any finite values are accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the bounds are empty, inverted, or not finite, or if
    /// the swarm has no particles.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.bounds.validate()?;
        if self.n_particles == 0 {
            return Err(ConfigurationError::NoParticles);
        }
        Ok(())
    }
}

/// Particle Swarm Optimizer
///
/// A single global-best swarm. Each iteration visits the particles in order and, for each one:
///
/// 1. evaluates the cost function at its position,
/// 2. updates its personal best on strict improvement,
/// 3. updates the global best on strict improvement (visible to the particles after it),
/// 4. updates its velocity,
/// ```math
/// v_i \leftarrow \omega v_i + c_1 r_1 \odot (p_i - x_i) + c_2 r_2 \odot (g - x_i) + m v_i
/// ```
///    with $`r_1, r_2 \sim U[0, 1)^D`$ and $`m = `$ [`MAXIMIZATION_MOMENTUM`] when maximizing
///    (`0` otherwise),
/// 5. moves it by its velocity and clamps the position (not the velocity) to the bounds.
///
/// After all particles have moved, their positions and the global best position are appended
/// to the history. See [^1] for background on the method.
///
/// [^1]: [Kennedy, J., & Eberhart, R. (1995). Particle swarm optimization. In Proceedings of ICNN'95 - International Conference on Neural Networks (Vol. 4, pp. 1942–1948). IEEE.](https://doi.org/10.1109/ICNN.1995.488968)
#[derive(Clone, Debug)]
pub struct PSO {
    config: PSOConfig,
    rng: Rng,
    status: SwarmStatus,
}

impl PSO {
    /// Validate `config`, then draw the initial global-best position and the particles from
    /// `rng` (in that order).
    ///
    /// The global-best score starts at [`Direction::worst`], so the first evaluation always
    /// replaces the placeholder position.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if [`PSOConfig::validate`] fails.
    pub fn new(config: PSOConfig, mut rng: Rng) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let global_best_position = config.bounds.random_point(&mut rng);
        let swarm = Swarm::new(
            config.bounds.clone(),
            config.n_particles,
            config.personal_best_init,
            config.direction,
            &mut rng,
        );
        if config.direction.is_maximization()
            && config.personal_best_init == PersonalBestInit::Infinity
        {
            warn!("personal bests are seeded with +inf while maximizing and will never update");
        }
        debug!(
            n_particles = config.n_particles,
            dimension = config.bounds.dimension(),
            direction = %config.direction,
            "initialized swarm"
        );
        let status = SwarmStatus {
            swarm,
            global_best_position,
            global_best_score: config.direction.worst(),
            message: "Initialized".to_string(),
            ..Default::default()
        };
        Ok(Self {
            config,
            rng,
            status,
        })
    }
    /// Run [`PSOConfig::max_iterations`] iterations.
    ///
    /// Calling this again continues from the current state and appends to the history.
    ///
    /// # Errors
    ///
    /// Returns the first `Err(E)` raised by the cost function. Iterations completed before the
    /// failure stay in the history.
    pub fn optimize<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<SwarmSummary, E> {
        self.optimize_with_observers(func, user_data, &[])
    }
    /// Like [`PSO::optimize`], but calls each [`Observer`] after every iteration.
    ///
    /// # Errors
    ///
    /// See [`PSO::optimize`].
    pub fn optimize_with_observers<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        observers: &[Arc<RwLock<dyn Observer<SwarmStatus, U>>>],
    ) -> Result<SwarmSummary, E> {
        debug!(
            iterations = self.config.max_iterations,
            "starting swarm optimization"
        );
        let summary =
            <Self as Algorithm<SwarmStatus, U, E>>::process(self, func, user_data, observers)?;
        debug!(
            global_best_score = self.status.global_best_score,
            n_f_evals = self.status.n_f_evals,
            "swarm optimization finished"
        );
        Ok(summary)
    }
    /// The configuration used by this optimizer.
    pub const fn config(&self) -> &PSOConfig {
        &self.config
    }
    /// The current [`SwarmStatus`].
    pub const fn status(&self) -> &SwarmStatus {
        &self.status
    }
    /// The best position found by any particle so far.
    pub const fn global_best_position(&self) -> &DVector<Float> {
        &self.status.global_best_position
    }
    /// The score at [`PSO::global_best_position`].
    pub const fn global_best_score(&self) -> Float {
        self.status.global_best_score
    }
    /// Every particle's position after each iteration, indexed `[iteration][particle]`.
    pub fn history(&self) -> &[Vec<DVector<Float>>] {
        &self.status.history
    }
    /// The global best position after each iteration.
    pub fn best_positions_per_iteration(&self) -> &[DVector<Float>] {
        &self.status.best_positions_per_iteration
    }
    /// The particles in swarm order.
    pub fn particles(&self) -> &[Particle] {
        &self.status.swarm.particles
    }
}

impl<U, E> Algorithm<SwarmStatus, U, E> for PSO {
    type Summary = SwarmSummary;

    fn status(&self) -> &SwarmStatus {
        &self.status
    }

    fn max_steps(&self) -> usize {
        self.config.max_iterations
    }

    fn step(
        &mut self,
        current_step: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        let Self {
            config,
            rng,
            status,
        } = self;
        let SwarmStatus {
            swarm: Swarm { bounds, particles },
            global_best_position,
            global_best_score,
            history,
            best_positions_per_iteration,
            n_f_evals,
            ..
        } = status;
        let direction = config.direction;
        let mut positions = Vec::with_capacity(particles.len());
        for particle in particles.iter_mut() {
            let score = func.evaluate(&particle.position, user_data)?;
            *n_f_evals += 1;
            particle.update_best(score, direction);
            if direction.is_better(score, *global_best_score) {
                *global_best_score = score;
                *global_best_position = particle.position.clone();
            }

            let dim = particle.dimension();
            let r1 = generate_unit_vector(dim, rng);
            let r2 = generate_unit_vector(dim, rng);
            let mut velocity = particle.velocity.scale(config.inertia)
                + r1.component_mul(&(&particle.best_position - &particle.position))
                    .scale(config.cognitive)
                + r2.component_mul(&(&*global_best_position - &particle.position))
                    .scale(config.social);
            if direction.is_maximization() {
                velocity += particle.velocity.scale(MAXIMIZATION_MOMENTUM);
            }
            if config.clamp_velocity {
                let limit = config.max_velocity;
                velocity
                    .iter_mut()
                    .for_each(|v| *v = v.max(-limit).min(limit));
            }
            particle.velocity = velocity;
            particle.position += &particle.velocity;
            bounds.clamp(&mut particle.position);
            positions.push(particle.position.clone());
        }
        history.push(positions);
        best_positions_per_iteration.push(global_best_position.clone());
        trace!(
            step = current_step,
            global_best_score = *global_best_score,
            "iteration complete"
        );
        status.update_message(&format!(
            "Completed iteration {} of {}",
            current_step + 1,
            config.max_iterations
        ));
        Ok(())
    }

    fn summarize(&self) -> SwarmSummary {
        SwarmSummary {
            bounds: self.config.bounds.clone(),
            parameter_names: self.config.parameter_names.clone(),
            direction: self.config.direction,
            message: self.status.message().to_string(),
            x: self.status.global_best_position.iter().cloned().collect(),
            fx: self.status.global_best_score,
            n_particles: self.status.swarm.len(),
            iterations: self.status.iterations(),
            cost_evals: self.status.n_f_evals,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{convert::Infallible, sync::Arc};

    use approx::assert_relative_eq;
    use fastrand::Rng;
    use parking_lot::RwLock;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        core::utils::generate_random_vector,
        test_functions::{ExponentialDecay, Quadratic, Rastrigin, Sine},
    };

    /// Records the global and personal best scores and positions after every iteration.
    #[derive(Default)]
    struct BestTracker {
        global: Vec<Float>,
        personal: Vec<Vec<Float>>,
        personal_positions: Vec<Vec<DVector<Float>>>,
        global_positions: Vec<DVector<Float>>,
    }

    impl<U> Observer<SwarmStatus, U> for BestTracker {
        fn observe(&mut self, _step: usize, status: &SwarmStatus, _user_data: &U) {
            self.global.push(status.global_best_score);
            self.global_positions
                .push(status.global_best_position.clone());
            self.personal
                .push(status.swarm.particles.iter().map(|p| p.best_score).collect());
            self.personal_positions.push(
                status
                    .swarm
                    .particles
                    .iter()
                    .map(|p| p.best_position.clone())
                    .collect(),
            );
        }
    }

    fn tracked(
        pso: &mut PSO,
        func: &dyn CostFunction,
    ) -> (SwarmSummary, Arc<RwLock<BestTracker>>) {
        let tracker = Arc::new(RwLock::new(BestTracker::default()));
        let observer: Arc<RwLock<dyn Observer<SwarmStatus, ()>>> = tracker.clone();
        let summary = pso
            .optimize_with_observers(func, &mut (), &[observer])
            .unwrap();
        (summary, tracker)
    }

    fn square_bounds(half_width: Float, dimension: usize) -> Vec<(Float, Float)> {
        vec![(-half_width, half_width); dimension]
    }

    #[test]
    fn test_quadratic_converges() {
        let config = PSOConfig::new(square_bounds(5.0, 2))
            .with_n_particles(10)
            .with_max_iterations(50);
        let mut pso = PSO::new(config, Rng::with_seed(0)).unwrap();
        let summary = pso.optimize(&Quadratic, &mut ()).unwrap();
        assert!(summary.fx < 0.5);
        assert!(pso.global_best_position().norm() < 0.75);
        assert_eq!(summary.iterations, 50);
        assert_eq!(summary.cost_evals, 500);
        assert_eq!(summary.x.len(), 2);
        assert_eq!(summary.fx, pso.global_best_score());
    }

    #[test]
    fn test_maximization_converges() {
        let config = PSOConfig::new(square_bounds(2.0, 2))
            .with_n_particles(20)
            .with_max_iterations(60)
            .with_maximization(true)
            .with_personal_best_init(PersonalBestInit::Worst);
        let mut pso = PSO::new(config, Rng::with_seed(1)).unwrap();
        let summary = pso.optimize(&ExponentialDecay, &mut ()).unwrap();
        assert_eq!(summary.direction, Direction::Maximize);
        assert!(summary.fx > 0.9);
        assert!(summary.fx <= 1.0);
    }

    #[test]
    fn test_history_shape() {
        let config = PSOConfig::new(square_bounds(3.0, 3))
            .with_n_particles(4)
            .with_max_iterations(6);
        let mut pso = PSO::new(config, Rng::with_seed(2)).unwrap();
        pso.optimize(&Rastrigin, &mut ()).unwrap();
        assert_eq!(pso.history().len(), 6);
        assert!(pso.history().iter().all(|bundle| bundle.len() == 4));
        assert!(pso
            .history()
            .iter()
            .flatten()
            .all(|position| position.len() == 3));
        assert_eq!(pso.best_positions_per_iteration().len(), 6);
        assert_eq!(
            pso.best_positions_per_iteration().last(),
            Some(pso.global_best_position())
        );
        // the last bundle holds the current positions
        let current: Vec<DVector<Float>> =
            pso.particles().iter().map(|p| p.position.clone()).collect();
        assert_eq!(pso.history().last(), Some(&current));
    }

    #[test]
    fn test_zero_iterations() {
        let config = PSOConfig::new(square_bounds(5.0, 2)).with_max_iterations(0);
        let mut pso = PSO::new(config, Rng::with_seed(3)).unwrap();
        let initial_position = pso.global_best_position().clone();
        assert_eq!(pso.global_best_score(), Float::INFINITY);
        let summary = pso.optimize(&Quadratic, &mut ()).unwrap();
        assert!(pso.history().is_empty());
        assert!(pso.best_positions_per_iteration().is_empty());
        assert_eq!(pso.global_best_position(), &initial_position);
        assert_eq!(pso.global_best_score(), Float::INFINITY);
        assert_eq!(summary.iterations, 0);
        assert_eq!(summary.cost_evals, 0);
        assert_eq!(summary.message, "Initialized");
    }

    #[test]
    fn test_zero_iterations_maximize_sentinel() {
        let config = PSOConfig::new(square_bounds(5.0, 2))
            .with_max_iterations(0)
            .with_direction(Direction::Maximize);
        let pso = PSO::new(config, Rng::with_seed(3)).unwrap();
        assert_eq!(pso.global_best_score(), Float::NEG_INFINITY);
        assert!(Bounds::from(square_bounds(5.0, 2)).contains(pso.global_best_position()));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let config = PSOConfig::new(square_bounds(5.12, 2))
            .with_n_particles(8)
            .with_max_iterations(25);
        let mut a = PSO::new(config.clone(), Rng::with_seed(7)).unwrap();
        let mut b = PSO::new(config, Rng::with_seed(7)).unwrap();
        a.optimize(&Rastrigin, &mut ()).unwrap();
        b.optimize(&Rastrigin, &mut ()).unwrap();
        assert_eq!(a.history(), b.history());
        assert_eq!(
            a.best_positions_per_iteration(),
            b.best_positions_per_iteration()
        );
        assert_eq!(a.global_best_score(), b.global_best_score());
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_different_seed_different_trajectory() {
        let config = PSOConfig::new(square_bounds(5.12, 2)).with_max_iterations(3);
        let mut a = PSO::new(config.clone(), Rng::with_seed(7)).unwrap();
        let mut b = PSO::new(config, Rng::with_seed(8)).unwrap();
        a.optimize(&Rastrigin, &mut ()).unwrap();
        b.optimize(&Rastrigin, &mut ()).unwrap();
        assert_ne!(a.history(), b.history());
    }

    #[test]
    fn test_monotonic_improvement_minimize() {
        let config = PSOConfig::new(square_bounds(5.12, 2))
            .with_n_particles(12)
            .with_max_iterations(40);
        let mut pso = PSO::new(config, Rng::with_seed(11)).unwrap();
        let (_, tracker) = tracked(&mut pso, &Rastrigin);
        let tracker = tracker.read();
        assert_eq!(tracker.global.len(), 40);
        assert!(tracker.global.windows(2).all(|w| w[1] <= w[0]));
        for pair in tracker.personal.windows(2) {
            assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| b <= a));
        }
        // the global best is at least as good as every personal best
        for (global, personal) in tracker.global.iter().zip(&tracker.personal) {
            assert!(personal.iter().all(|p| global <= p));
        }
    }

    #[test]
    fn test_monotonic_improvement_maximize() {
        let config = PSOConfig::new(square_bounds(3.0, 2))
            .with_n_particles(6)
            .with_max_iterations(30)
            .with_maximization(true)
            .with_personal_best_init(PersonalBestInit::Worst);
        let mut pso = PSO::new(config, Rng::with_seed(12)).unwrap();
        let (_, tracker) = tracked(&mut pso, &ExponentialDecay);
        let tracker = tracker.read();
        assert!(tracker.global.windows(2).all(|w| w[1] >= w[0]));
        for pair in tracker.personal.windows(2) {
            assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| b >= a));
        }
        for (global, personal) in tracker.global.iter().zip(&tracker.personal) {
            assert!(personal.iter().all(|p| global >= p));
        }
    }

    #[test]
    fn test_infinity_seed_freezes_personal_bests_when_maximizing() {
        let config = PSOConfig::new(square_bounds(3.0, 2))
            .with_n_particles(5)
            .with_max_iterations(10)
            .with_maximization(true);
        let mut pso = PSO::new(config, Rng::with_seed(13)).unwrap();
        let starts: Vec<DVector<Float>> =
            pso.particles().iter().map(|p| p.position.clone()).collect();
        let (summary, tracker) = tracked(&mut pso, &ExponentialDecay);
        let tracker = tracker.read();
        assert!(tracker
            .personal
            .iter()
            .flatten()
            .all(|&score| score == Float::INFINITY));
        assert!(tracker
            .personal_positions
            .iter()
            .all(|positions| positions == &starts));
        // the global best is unaffected by the personal-best seed
        assert!(summary.fx.is_finite());
        assert!(summary.fx > 0.0);
    }

    #[test]
    fn test_global_best_is_best_evaluation() {
        struct Recording;
        impl CostFunction<Vec<(DVector<Float>, Float)>, Infallible> for Recording {
            fn evaluate(
                &self,
                x: &DVector<Float>,
                seen: &mut Vec<(DVector<Float>, Float)>,
            ) -> Result<Float, Infallible> {
                let fx = Rastrigin.evaluate(x, &mut ())?;
                seen.push((x.clone(), fx));
                Ok(fx)
            }
        }
        let config = PSOConfig::new(square_bounds(5.12, 2))
            .with_n_particles(7)
            .with_max_iterations(15);
        let mut pso = PSO::new(config, Rng::with_seed(21)).unwrap();
        let mut seen = Vec::new();
        pso.optimize(&Recording, &mut seen).unwrap();
        assert_eq!(seen.len(), 7 * 15);
        // the first occurrence of the minimum wins because improvements must be strict
        let (best_x, best_fx) = seen
            .iter()
            .fold(None::<&(DVector<Float>, Float)>, |acc, item| match acc {
                Some(a) if a.1 <= item.1 => Some(a),
                _ => Some(item),
            })
            .unwrap();
        assert_eq!(pso.global_best_score(), *best_fx);
        assert_eq!(pso.global_best_position(), best_x);
    }

    #[test]
    fn test_single_particle_tracks_global_best() {
        for (direction, init) in [
            (Direction::Minimize, PersonalBestInit::Infinity),
            (Direction::Maximize, PersonalBestInit::Worst),
        ] {
            let config = PSOConfig::new(square_bounds(5.12, 2))
                .with_n_particles(1)
                .with_max_iterations(20)
                .with_direction(direction)
                .with_personal_best_init(init);
            let mut pso = PSO::new(config, Rng::with_seed(5)).unwrap();
            let (_, tracker) = tracked(&mut pso, &Rastrigin);
            let tracker = tracker.read();
            for step in 0..20 {
                assert_eq!(tracker.personal[step][0], tracker.global[step]);
                assert_eq!(
                    tracker.personal_positions[step][0],
                    tracker.global_positions[step]
                );
            }
        }
    }

    #[test]
    fn test_momentum_only_when_maximizing() {
        for direction in [Direction::Minimize, Direction::Maximize] {
            let config = PSOConfig::new(square_bounds(100.0, 3))
                .with_n_particles(4)
                .with_max_iterations(1)
                .with_direction(direction)
                .with_cognitive(0.0)
                .with_social(0.0);
            let mut pso = PSO::new(config, Rng::with_seed(17)).unwrap();
            let before = pso.particles().to_vec();
            pso.optimize(&Quadratic, &mut ()).unwrap();
            let factor = if direction.is_maximization() {
                0.6 + MAXIMIZATION_MOMENTUM
            } else {
                0.6
            };
            for (old, new) in before.iter().zip(pso.particles()) {
                for (v_old, v_new) in old.velocity.iter().zip(new.velocity.iter()) {
                    assert_relative_eq!(*v_new, v_old * factor, epsilon = 1e-12);
                }
                for i in 0..3 {
                    assert_relative_eq!(
                        new.position[i],
                        old.position[i] + new.velocity[i],
                        epsilon = 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn test_velocity_survives_clamping() {
        let config = PSOConfig::new(vec![(0.0, 1e-6), (0.0, 1e-6)])
            .with_n_particles(5)
            .with_max_iterations(1)
            .with_inertia(1.0)
            .with_cognitive(0.0)
            .with_social(0.0);
        let mut pso = PSO::new(config, Rng::with_seed(19)).unwrap();
        let before = pso.particles().to_vec();
        pso.optimize(&Quadratic, &mut ()).unwrap();
        let bounds = pso.config().bounds.clone();
        for (old, new) in before.iter().zip(pso.particles()) {
            assert_eq!(new.velocity, old.velocity);
            assert!(bounds.contains(&new.position));
            for (i, v) in new.velocity.iter().enumerate() {
                if v.abs() > 1e-6 {
                    assert!(bounds[i].at_bound(new.position[i]));
                }
            }
        }
    }

    #[test]
    fn test_max_velocity_inert_by_default() {
        let config = PSOConfig::new(square_bounds(50.0, 2))
            .with_n_particles(10)
            .with_max_iterations(5)
            .with_social(4.0)
            .with_max_velocity(1e-3);
        let mut pso = PSO::new(config, Rng::with_seed(23)).unwrap();
        pso.optimize(&Quadratic, &mut ()).unwrap();
        assert!(pso
            .particles()
            .iter()
            .flat_map(|p| p.velocity.iter())
            .any(|v| v.abs() > 1e-3));
    }

    #[test]
    fn test_velocity_clamping() {
        let config = PSOConfig::new(square_bounds(50.0, 2))
            .with_n_particles(10)
            .with_max_iterations(5)
            .with_social(4.0)
            .with_max_velocity(0.05)
            .with_velocity_clamping(true);
        let mut pso = PSO::new(config, Rng::with_seed(23)).unwrap();
        pso.optimize(&Quadratic, &mut ()).unwrap();
        assert!(pso
            .particles()
            .iter()
            .flat_map(|p| p.velocity.iter())
            .all(|v| v.abs() <= 0.05));
    }

    #[test]
    fn test_evaluation_error_keeps_history() {
        struct FailsAfter(usize);
        impl CostFunction<usize, String> for FailsAfter {
            fn evaluate(&self, x: &DVector<Float>, calls: &mut usize) -> Result<Float, String> {
                if *calls == self.0 {
                    return Err(format!("evaluation #{} failed", calls));
                }
                *calls += 1;
                Ok(x.norm_squared())
            }
        }
        let config = PSOConfig::new(square_bounds(1.0, 2))
            .with_n_particles(3)
            .with_max_iterations(10);
        let mut pso = PSO::new(config, Rng::with_seed(29)).unwrap();
        let mut calls = 0;
        let result = pso.optimize(&FailsAfter(7), &mut calls);
        assert_eq!(result.unwrap_err(), "evaluation #7 failed");
        assert_eq!(calls, 7);
        assert_eq!(pso.history().len(), 2);
        assert_eq!(pso.best_positions_per_iteration().len(), 2);
        assert_eq!(pso.status().n_f_evals, 7);
        assert_eq!(pso.status().message, "Completed iteration 2 of 10");
    }

    #[test]
    fn test_closure_objective() {
        let shifted =
            |x: &DVector<Float>| -> Result<Float, Infallible> { Ok((x[0] - 1.0).powi(2)) };
        let config = PSOConfig::new(vec![(-4.0, 4.0)])
            .with_n_particles(8)
            .with_max_iterations(40);
        let mut pso = PSO::new(config, Rng::with_seed(31)).unwrap();
        let summary = pso.optimize(&shifted, &mut ()).unwrap();
        assert_relative_eq!(summary.x[0], 1.0, epsilon = 0.1);
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            PSO::new(PSOConfig::default(), Rng::with_seed(0)).unwrap_err(),
            ConfigurationError::EmptyBounds
        );
        assert_eq!(
            PSO::new(
                PSOConfig::new(square_bounds(1.0, 2)).with_n_particles(0),
                Rng::with_seed(0)
            )
            .unwrap_err(),
            ConfigurationError::NoParticles
        );
        assert!(matches!(
            PSO::new(PSOConfig::new(vec![(1.0, -1.0)]), Rng::with_seed(0)),
            Err(ConfigurationError::InvertedBound { index: 0, .. })
        ));
    }

    #[test]
    fn test_default_config() {
        let config = PSOConfig::default();
        assert_eq!(config.n_particles, 30);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.inertia, 0.6);
        assert_eq!(config.cognitive, 0.5);
        assert_eq!(config.social, 2.0);
        assert_eq!(config.max_velocity, 2.0);
        assert!(!config.clamp_velocity);
        assert_eq!(config.direction, Direction::Minimize);
        assert_eq!(config.personal_best_init, PersonalBestInit::Infinity);
    }

    #[test]
    fn test_construction_draw_order() {
        let bounds = square_bounds(5.0, 2);
        let pso = PSO::new(
            PSOConfig::new(bounds.clone()).with_n_particles(2),
            Rng::with_seed(37),
        )
        .unwrap();
        let mut rng = Rng::with_seed(37);
        let bounds = Bounds::from(bounds);
        let global = bounds.random_point(&mut rng);
        let first = Particle::new(&bounds, &mut rng);
        assert_eq!(pso.global_best_position(), &global);
        assert_eq!(pso.particles()[0].position, first.position);
        assert_eq!(pso.particles()[0].velocity, first.velocity);
    }

    #[test]
    fn test_continue_run() {
        let config = PSOConfig::new(square_bounds(5.0, 2))
            .with_n_particles(3)
            .with_max_iterations(4);
        let mut pso = PSO::new(config, Rng::with_seed(41)).unwrap();
        pso.optimize(&Quadratic, &mut ()).unwrap();
        let summary = pso.optimize(&Quadratic, &mut ()).unwrap();
        assert_eq!(pso.history().len(), 8);
        assert_eq!(summary.iterations, 8);
        assert_eq!(summary.message, "Completed iteration 4 of 4");
        assert_eq!(pso.status().message(), summary.message);
    }

    /// A plain, loop-based rendition of the update rule driven by the same random stream.
    struct ManualRun {
        history: Vec<Vec<DVector<Float>>>,
        best_positions: Vec<DVector<Float>>,
        global_best_score: Float,
        velocities: Vec<DVector<Float>>,
    }

    fn manual_run(config: &PSOConfig, seed: u64, func: &dyn CostFunction) -> ManualRun {
        let mut rng = Rng::with_seed(seed);
        let bounds = &config.bounds;
        let dim = bounds.dimension();
        let n = config.n_particles;
        let maximize = config.direction.is_maximization();
        let better = |a: Float, b: Float| if maximize { a > b } else { a < b };

        let mut g = bounds.random_point(&mut rng);
        let mut g_score = if maximize {
            Float::NEG_INFINITY
        } else {
            Float::INFINITY
        };
        let mut x = Vec::with_capacity(n);
        let mut v = Vec::with_capacity(n);
        for _ in 0..n {
            x.push(bounds.random_point(&mut rng));
            v.push(generate_random_vector(dim, -0.1, 0.1, &mut rng));
        }
        let mut p = x.clone();
        let seed_score = match (config.personal_best_init, maximize) {
            (PersonalBestInit::Worst, true) => Float::NEG_INFINITY,
            _ => Float::INFINITY,
        };
        let mut p_score = vec![seed_score; n];

        let mut history = Vec::new();
        let mut best_positions = Vec::new();
        for _ in 0..config.max_iterations {
            let mut bundle = Vec::new();
            for i in 0..n {
                let score = func.evaluate(&x[i], &mut ()).unwrap();
                if better(score, p_score[i]) {
                    p_score[i] = score;
                    p[i] = x[i].clone();
                }
                if better(score, g_score) {
                    g_score = score;
                    g = x[i].clone();
                }
                let r1 = generate_unit_vector(dim, &mut rng);
                let r2 = generate_unit_vector(dim, &mut rng);
                let mut new_v = DVector::zeros(dim);
                for k in 0..dim {
                    new_v[k] = v[i][k] * config.inertia
                        + r1[k] * (p[i][k] - x[i][k]) * config.cognitive
                        + r2[k] * (g[k] - x[i][k]) * config.social;
                    if maximize {
                        new_v[k] += v[i][k] * 0.01;
                    }
                }
                v[i] = new_v;
                for k in 0..dim {
                    x[i][k] = (x[i][k] + v[i][k])
                        .max(bounds[k].lower())
                        .min(bounds[k].upper());
                }
                bundle.push(x[i].clone());
            }
            history.push(bundle);
            best_positions.push(g.clone());
        }
        ManualRun {
            history,
            best_positions,
            global_best_score: g_score,
            velocities: v,
        }
    }

    #[test]
    fn test_matches_manual_update_rule() {
        for (direction, init) in [
            (Direction::Minimize, PersonalBestInit::Infinity),
            (Direction::Maximize, PersonalBestInit::Infinity),
            (Direction::Maximize, PersonalBestInit::Worst),
        ] {
            for seed in [0, 9, 123] {
                let config = PSOConfig::new(vec![(-3.0, 3.0), (-1.0, 4.0)])
                    .with_n_particles(4)
                    .with_max_iterations(15)
                    .with_direction(direction)
                    .with_personal_best_init(init)
                    .with_cognitive(1.3)
                    .with_social(1.7);
                let expected = manual_run(&config, seed, &Sine);
                let mut pso = PSO::new(config, Rng::with_seed(seed)).unwrap();
                pso.optimize(&Sine, &mut ()).unwrap();
                assert_eq!(pso.history(), expected.history.as_slice());
                assert_eq!(
                    pso.best_positions_per_iteration(),
                    expected.best_positions.as_slice()
                );
                assert_eq!(pso.global_best_score(), expected.global_best_score);
                for (particle, velocity) in pso.particles().iter().zip(&expected.velocities) {
                    assert_eq!(&particle.velocity, velocity);
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]
        #[test]
        fn prop_positions_stay_in_bounds(
            seed in any::<u64>(),
            inertia in 0.0..(2.0 as Float),
            cognitive in 0.0..(4.0 as Float),
            social in 0.0..(4.0 as Float),
            maximize in any::<bool>(),
            lower in -10.0..(0.0 as Float),
            width in 0.0..(20.0 as Float),
        ) {
            let bounds = vec![(lower, lower + width), (lower / 2.0, lower / 2.0 + width)];
            let config = PSOConfig::new(bounds.clone())
                .with_n_particles(5)
                .with_max_iterations(20)
                .with_maximization(maximize)
                .with_inertia(inertia)
                .with_cognitive(cognitive)
                .with_social(social);
            let mut pso = PSO::new(config, Rng::with_seed(seed)).unwrap();
            let wavy = |x: &DVector<Float>| -> Result<Float, Infallible> {
                Ok(x.iter().map(|v| v.sin()).sum())
            };
            pso.optimize(&wavy, &mut ()).unwrap();
            let bounds = Bounds::from(bounds);
            prop_assert_eq!(pso.history().len(), 20);
            for bundle in pso.history() {
                prop_assert_eq!(bundle.len(), 5);
                for x in bundle {
                    prop_assert!(bounds.contains(x));
                }
            }
        }
    }
}
