//! # barrier-mc: Vectorized Monte Carlo Valuation of Barrier Options
//!
//! Values a discretely monitored down-and-out barrier call inside a Monte
//! Carlo simulation, at an arbitrary evaluation time.
//!
//! ## Key Features
//!
//! - **Vectorized payoffs**: barrier monitoring with per-scenario arithmetic
//!   (`floor`, branch-free `select`) instead of per-path branching
//! - **Numeraire-aware valuation**: payoffs are moved between the numeraire and
//!   measure at maturity and at the evaluation time
//! - **Pluggable models**: products only see the `SimulationModel` trait
//! - **Parallel**: path generation and large vector kernels run on Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use barrier_mc::mc::{BarrierOption, MonteCarloProduct};
//! use barrier_mc::models::{BlackScholesConfig, BlackScholesMonteCarlo};
//!
//! let model = BlackScholesMonteCarlo::new(BlackScholesConfig {
//!     steps: 50,
//!     paths: 10_000,
//!     s0: 100.0,
//!     r: 0.0,
//!     sigma: 0.2,
//!     t: 1.0,
//!     seed: 7,
//! })
//! .expect("Valid configuration");
//!
//! let option = BarrierOption::new(1.0, 100.0, 70.0).expect("Valid contract");
//! let value = option.value(0.0, &model).expect("Grid contains maturity");
//! println!("Barrier call: {:.4} ± {:.4}", value.average(), value.standard_error());
//! ```
//!
//! ## Mathematical Foundation
//!
//! For a numeraire `N` and Monte Carlo weights `w`, a cashflow `X` paid at `T`
//! has the per-scenario value at `t`
//! ```text
//! V_i(t) = X_i / N_i(T) * w_i(T) * N_i(t) / w_i(t)
//! ```
//! whose sample mean is the Monte Carlo price.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod rng;
pub mod stochastic;

// Re-export commonly used types for convenience
pub use error::{PricingError, PricingResult};
pub use stochastic::ScenarioVector;
