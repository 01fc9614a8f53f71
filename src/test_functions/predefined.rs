use std::{convert::Infallible, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::UnknownFunctionError,
    test_functions::{Ackley, ExponentialDecay, Logarithmic, Quadratic, Rastrigin, Sine},
    traits::CostFunction,
    DVector, Float,
};

/// The built-in objectives, addressable by name.
///
/// ```rust
/// use swarmopt::test_functions::PredefinedFunction;
///
/// let f: PredefinedFunction = "exponential_decay".parse().unwrap();
/// assert_eq!(f, PredefinedFunction::ExponentialDecay);
/// assert_eq!(f.to_string(), "exponential_decay");
/// assert!("rosenbrock".parse::<PredefinedFunction>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredefinedFunction {
    /// See [`Quadratic`]
    Quadratic,
    /// See [`Sine`]
    Sine,
    /// See [`ExponentialDecay`]
    ExponentialDecay,
    /// See [`Logarithmic`]
    Logarithmic,
    /// See [`Rastrigin`]
    Rastrigin,
    /// See [`Ackley`]
    Ackley,
}

impl PredefinedFunction {
    /// Every predefined function, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Quadratic,
        Self::Sine,
        Self::ExponentialDecay,
        Self::Logarithmic,
        Self::Rastrigin,
        Self::Ackley,
    ];

    /// The name accepted by [`PredefinedFunction::from_str`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Quadratic => "quadratic",
            Self::Sine => "sine",
            Self::ExponentialDecay => "exponential_decay",
            Self::Logarithmic => "logarithmic",
            Self::Rastrigin => "rastrigin",
            Self::Ackley => "ackley",
        }
    }
}

impl Display for PredefinedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PredefinedFunction {
    type Err = UnknownFunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| UnknownFunctionError(s.to_string()))
    }
}

impl CostFunction for PredefinedFunction {
    fn evaluate(&self, x: &DVector<Float>, user_data: &mut ()) -> Result<Float, Infallible> {
        match self {
            Self::Quadratic => Quadratic.evaluate(x, user_data),
            Self::Sine => Sine.evaluate(x, user_data),
            Self::ExponentialDecay => ExponentialDecay.evaluate(x, user_data),
            Self::Logarithmic => Logarithmic.evaluate(x, user_data),
            Self::Rastrigin => Rastrigin.evaluate(x, user_data),
            Self::Ackley => Ackley.evaluate(x, user_data),
        }
    }
}
