//! Monte Carlo products valued on simulated scenario vectors.

pub mod barrier_option;
pub mod european_option;
pub mod payoffs;
pub mod product;

pub use barrier_option::{BarrierOption, BarrierProductSpec};
pub use european_option::EuropeanOption;
pub use product::MonteCarloProduct;
