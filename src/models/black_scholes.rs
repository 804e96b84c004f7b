// src/models/black_scholes.rs
//! Black-Scholes Monte Carlo Simulation
//!
//! # Mathematical Framework
//!
//! Under the risk-neutral measure with bank-account numeraire:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t,      N(t) = e^{rt}
//! ```
//!
//! Paths are generated on an equidistant grid with the exact log-normal step
//! ```text
//! S_{i+1} = S_i * exp((r - σ²/2)Δt + σ√Δt * Z_i),   Z_i ~ N(0,1)
//! ```
//! so there is no discretization bias at the grid times.
//!
//! # Monte Carlo Weights
//!
//! All scenarios are equally likely: the weight of each path is `1/N` at every
//! time. Both the numeraire and the weights are deterministic and are returned
//! as constant vectors.

use super::gbm::Gbm;
use super::model::SimulationModel;
use super::time_discretization::TimeDiscretization;
use crate::error::{validation::*, PricingError, PricingResult};
use crate::rng::{self, RngFactory};
use crate::stochastic::ScenarioVector;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

#[derive(Clone, Debug)]
pub struct BlackScholesConfig {
    pub steps: usize,
    pub paths: usize,
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
    pub t: f64, // Time horizon of the grid
    pub seed: u64,
}

impl BlackScholesConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> PricingResult<()> {
        validate_steps(self.steps)?;
        validate_paths(self.paths)?;
        validate_positive("s0", self.s0)?;
        validate_finite("s0", self.s0)?;
        validate_finite("r", self.r)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        validate_finite("t", self.t)?;
        Ok(())
    }
}

impl Default for BlackScholesConfig {
    fn default() -> Self {
        BlackScholesConfig {
            steps: 100,
            paths: 100_000,
            s0: 100.0,
            r: 0.0,
            sigma: 0.2,
            t: 1.0,
            seed: 3141,
        }
    }
}

pub struct BlackScholesMonteCarlo {
    config: BlackScholesConfig,
    discretization: TimeDiscretization,
    paths: Array2<f64>, // (scenario, time index)
}

impl BlackScholesMonteCarlo {
    /// Validate the configuration and simulate all paths.
    ///
    /// # Errors
    ///
    /// `InvalidParameters`/`InvalidConfiguration` for a bad configuration,
    /// `NumericalInstability` if a simulated price is not finite and positive.
    pub fn new(config: BlackScholesConfig) -> PricingResult<Self> {
        config.validate()?;

        let dt = config.t / config.steps as f64;
        let discretization = TimeDiscretization::new(0.0, config.steps, dt)?;
        let paths = simulate_paths(&config, dt);

        if let Some(bad) = paths.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(PricingError::NumericalInstability {
                method: "Black-Scholes exact step".to_string(),
                reason: format!("simulated asset price is invalid: {}", bad),
            });
        }

        Ok(BlackScholesMonteCarlo {
            config,
            discretization,
            paths,
        })
    }

    pub fn discretization(&self) -> &TimeDiscretization {
        &self.discretization
    }

    pub fn number_of_paths(&self) -> usize {
        self.config.paths
    }
}

fn simulate_paths(config: &BlackScholesConfig, dt: f64) -> Array2<f64> {
    let gbm = Gbm::new(config.r, config.sigma);
    let factory = RngFactory::new(config.seed);
    let mut paths = Array2::zeros((config.paths, config.steps + 1));

    paths
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut path)| {
            let mut rng = factory.create_std_rng(i as u64);
            let mut current_s = config.s0;
            path[0] = current_s;
            for step in 1..=config.steps {
                let z = rng::get_normal_draw(&mut rng);
                current_s = gbm.exact_step(current_s, dt, z);
                path[step] = current_s;
            }
        });

    paths
}

impl SimulationModel for BlackScholesMonteCarlo {
    fn time_index(&self, time: f64) -> PricingResult<usize> {
        self.discretization.time_index(time).ok_or_else(|| {
            PricingError::calculation(
                "Black-Scholes model",
                format!(
                    "time {} is not on the simulation grid [0, {}] with {} steps",
                    time,
                    self.discretization.last_time(),
                    self.discretization.number_of_time_steps()
                ),
            )
        })
    }

    fn asset_value(&self, time_index: usize, asset_index: usize) -> PricingResult<ScenarioVector> {
        if asset_index != 0 {
            return Err(PricingError::calculation(
                "Black-Scholes model",
                format!("unknown asset index {} (single-asset model)", asset_index),
            ));
        }
        if time_index >= self.discretization.number_of_times() {
            return Err(PricingError::calculation(
                "Black-Scholes model",
                format!(
                    "time index {} out of range (0..{})",
                    time_index,
                    self.discretization.number_of_times()
                ),
            ));
        }
        Ok(ScenarioVector::from_array(self.paths.column(time_index).to_owned()))
    }

    fn numeraire(&self, time: f64) -> PricingResult<ScenarioVector> {
        if !time.is_finite() {
            return Err(PricingError::calculation(
                "Black-Scholes model",
                format!("numeraire requested at non-finite time {}", time),
            ));
        }
        Ok(ScenarioVector::constant((self.config.r * time).exp()))
    }

    fn monte_carlo_weights(&self, time: f64) -> PricingResult<ScenarioVector> {
        if !time.is_finite() {
            return Err(PricingError::calculation(
                "Black-Scholes model",
                format!("weights requested at non-finite time {}", time),
            ));
        }
        Ok(ScenarioVector::constant(1.0 / self.config.paths as f64))
    }
}
