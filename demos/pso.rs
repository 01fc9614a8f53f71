use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use fastrand::Rng;
use swarmopt::algorithms::particles::{PSOConfig, PersonalBestInit, PSO};
use swarmopt::observers::BestScoreObserver;
use swarmopt::test_functions::PredefinedFunction;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Log with RUST_LOG=swarmopt=debug (or trace for every iteration)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Pick an objective by name, e.g. `cargo run --example pso -- exponential_decay`
    let function: PredefinedFunction = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("ackley")
        .parse()?;
    let maximize = function == PredefinedFunction::ExponentialDecay;

    // Construct the optimizer over a 2D box
    let config = PSOConfig::new(vec![(-5.0, 5.0), (-5.0, 5.0)])
        .with_n_particles(30)
        .with_max_iterations(100)
        .with_maximization(maximize)
        .with_personal_best_init(PersonalBestInit::Worst)
        .with_parameter_names(["x".to_string(), "y".to_string()]);
    let mut pso = PSO::new(config, Rng::with_seed(0))?;

    // Record a convergence curve while running
    let scores = BestScoreObserver::build();
    let summary = pso.optimize_with_observers(&function, &mut (), &[scores.clone()])?;

    println!("{}", function);
    println!("{}", summary);

    // Export the trajectory to a Python .pkl file to animate it via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("data.pkl"))?);
    serde_pickle::to_writer(&mut writer, pso.status(), Default::default())?;
    let mut writer = BufWriter::new(File::create(Path::new("scores.pkl"))?);
    serde_pickle::to_writer(&mut writer, &scores.read().scores, Default::default())?;
    Ok(())
}
