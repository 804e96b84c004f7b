//! Vectorized random variables over Monte Carlo scenarios.

pub mod scenario_vector;

pub use scenario_vector::ScenarioVector;
