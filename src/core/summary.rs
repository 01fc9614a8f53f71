use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

use super::{Bounds, Direction};

/// A struct that holds the results of a swarm optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmSummary {
    /// The bounds of the search space.
    pub bounds: Bounds,
    /// The names of the parameters. This is `None` if no names were set.
    pub parameter_names: Option<Vec<String>>,
    /// Whether the run minimized or maximized the cost function.
    pub direction: Direction,
    /// A message describing how the run ended.
    pub message: String,
    /// The best position found by the swarm.
    pub x: Vec<Float>,
    /// The value of the cost function at [`SwarmSummary::x`].
    pub fx: Float,
    /// The number of particles in the swarm.
    pub n_particles: usize,
    /// The number of iterations which were run.
    pub iterations: usize,
    /// The number of function evaluations.
    pub cost_evals: usize,
}

impl SwarmSummary {
    /// Set the names associated with each parameter.
    pub fn with_parameter_names(mut self, parameter_names: &[String]) -> Self {
        self.parameter_names = Some(parameter_names.to_vec());
        self
    }
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use tabled::{builder::Builder, settings::Style};

        let mut overview = Builder::default();
        overview.push_record(["SWARM RESULTS".to_string(), String::new()]);
        overview.push_record(["Goal".to_string(), self.direction.to_string()]);
        overview.push_record(["f(x)".to_string(), format!("{:.5}", self.fx)]);
        overview.push_record(["Particles".to_string(), self.n_particles.to_string()]);
        overview.push_record(["Iterations".to_string(), self.iterations.to_string()]);
        overview.push_record(["#f(x)".to_string(), self.cost_evals.to_string()]);
        overview.push_record(["Message".to_string(), self.message.clone()]);
        let mut overview = overview.build();
        overview.with(Style::rounded());

        let names = self.parameter_names.clone().unwrap_or_else(|| {
            (0..self.x.len())
                .map(|i| format!("x_{}", i))
                .collect::<Vec<_>>()
        });
        let mut parameters = Builder::default();
        parameters.push_record(["Parameter", "=", "-Bound", "+Bound", "At Limit?"]);
        for ((v, b), n) in self.x.iter().zip(self.bounds.iter()).zip(names) {
            parameters.push_record([
                n,
                format!("{:.5}", v),
                format!("{:.5}", b.lower()),
                format!("{:.5}", b.upper()),
                if b.at_bound(*v) { "Yes" } else { "No" }.to_string(),
            ]);
        }
        let mut parameters = parameters.build();
        parameters.with(Style::rounded());

        write!(f, "{}\n{}", overview, parameters)
    }
}
