//! Simulation models consumed by the Monte Carlo products.

pub mod black_scholes;
pub mod fixed_paths;
pub mod gbm;
pub mod model;
pub mod time_discretization;

pub use black_scholes::{BlackScholesConfig, BlackScholesMonteCarlo};
pub use fixed_paths::FixedPathModel;
pub use model::SimulationModel;
pub use time_discretization::TimeDiscretization;
