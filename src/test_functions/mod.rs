/// Module containing the quadratic (sphere) test function.
pub mod quadratic;
pub use quadratic::Quadratic;

/// Module containing the sine test function.
pub mod sine;
pub use sine::Sine;

/// Module containing the exponential decay test function.
pub mod exponential_decay;
pub use exponential_decay::ExponentialDecay;

/// Module containing the logarithmic test function.
pub mod logarithmic;
pub use logarithmic::Logarithmic;

/// Module containing the Rastrigin test function.
pub mod rastrigin;
pub use rastrigin::Rastrigin;

/// Module containing the Ackley test function.
pub mod ackley;
pub use ackley::Ackley;

/// Module containing a name-addressable enumeration of the test functions.
pub mod predefined;
pub use predefined::PredefinedFunction;
