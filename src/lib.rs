//! `swarmopt` is a small, trait-based implementation of global-best Particle Swarm Optimization
//! (PSO). A swarm of particles searches a bounded box in $`\mathbb{R}^D`$ for an extremum of a
//! user-supplied [`CostFunction`](crate::traits::CostFunction), recording every particle's
//! position and the global best after each iteration so that the run can be animated or
//! reported on afterwards.
//!
//! # Table of Contents
//! - [Quick Start](#quick-start)
//! - [The Update Rule](#the-update-rule)
//! - [Known Quirks](#known-quirks)
//!
//! # Quick Start
//!
//! Any closure of the form `Fn(&DVector<Float>) -> Result<Float, E>` is a cost function, and a
//! number of common test functions live in the [`test_functions`] module:
//!
//! ```rust
//! use fastrand::Rng;
//! use swarmopt::prelude::*;
//! use swarmopt::test_functions::Quadratic;
//!
//! let config = PSOConfig::new(vec![(-5.0, 5.0), (-5.0, 5.0)])
//!     .with_n_particles(10)
//!     .with_max_iterations(50);
//! let mut pso = PSO::new(config, Rng::with_seed(0)).unwrap();
//! let summary = pso.optimize(&Quadratic, &mut ()).unwrap();
//! assert!(summary.fx < 0.5);
//! assert_eq!(pso.history().len(), 50);
//! println!("{}", summary);
//! ```
//!
//! # The Update Rule
//!
//! Each iteration visits the particles in order. A particle is evaluated, its personal best and
//! the swarm's global best are updated (so later particles in the same iteration already see an
//! improved global best), and then its velocity and position are advanced:
//!
//! ```math
//! v_i \leftarrow \omega v_i + c_1 r_1 \odot (p_i - x_i) + c_2 r_2 \odot (g - x_i) + m v_i
//! ```
//! ```math
//! x_i \leftarrow \text{clamp}(x_i + v_i, l, u)
//! ```
//! where $`r_1, r_2 \sim U[0, 1)^D`$ are drawn fresh for every particle, and $`m = 0.01`$ when
//! maximizing and $`m = 0`$ otherwise. Only the position is clamped to the bounds; the velocity
//! is kept as-is, so a particle can keep pushing against a wall.
//!
//! # Known Quirks
//!
//! Two behaviors are kept by default so that seeded trajectories stay reproducible across
//! versions, and each can be switched off in the [`PSOConfig`](crate::algorithms::particles::PSOConfig):
//!
//! * Personal bests start at `+inf` regardless of direction, so when maximizing they never
//!   improve. Use [`PersonalBestInit::Worst`](crate::algorithms::particles::PersonalBestInit) to
//!   seed them with the worst value for the active direction instead.
//! * `max_velocity` is stored but not applied unless velocity clamping is enabled.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the swarm optimization algorithms
pub mod algorithms;
/// Module containing bounds, optimization directions, and run summaries
pub mod core;
/// Module containing the crate's error types
pub mod error;
/// Module containing stock [`Observer`](crate::traits::Observer)s
pub mod observers;
/// Module containing standard functions for testing algorithms
pub mod test_functions;
/// Module containing the traits which connect problems, algorithms, and observers
pub mod traits;

pub use nalgebra::DVector;

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled)
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled)
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant $`\pi`$
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Euler's number $`e`$
#[cfg(not(feature = "f32"))]
pub const E: Float = std::f64::consts::E;

/// Euler's number $`e`$
#[cfg(feature = "f32")]
pub const E: Float = std::f32::consts::E;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        algorithms::particles::{PSOConfig, PersonalBestInit, SwarmStatus, PSO},
        core::{Bound, Bounds, Direction, SwarmSummary},
        error::ConfigurationError,
        traits::{Algorithm, CostFunction, Observer, Status},
        DVector, Float,
    };
}
