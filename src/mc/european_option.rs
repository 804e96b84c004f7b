// src/mc/european_option.rs
use super::payoffs;
use super::product::{discount_to_evaluation_time, MonteCarloProduct};
use crate::error::{validation::*, PricingResult};
use crate::models::SimulationModel;
use crate::stochastic::ScenarioVector;

/// European call `max(S_T - K, 0)` on one asset of the model.
#[derive(Clone, Debug, PartialEq)]
pub struct EuropeanOption {
    maturity: f64,
    strike: f64,
    underlying_index: usize,
}

impl EuropeanOption {
    /// Call on asset 0 (single-asset case).
    pub fn new(maturity: f64, strike: f64) -> PricingResult<Self> {
        Self::with_underlying(maturity, strike, 0)
    }

    pub fn with_underlying(maturity: f64, strike: f64, underlying_index: usize) -> PricingResult<Self> {
        validate_positive("maturity", maturity)?;
        validate_finite("maturity", maturity)?;
        validate_finite("strike", strike)?;
        Ok(EuropeanOption {
            maturity,
            strike,
            underlying_index,
        })
    }
}

impl MonteCarloProduct for EuropeanOption {
    fn value(&self, evaluation_time: f64, model: &dyn SimulationModel) -> PricingResult<ScenarioVector> {
        let underlying_at_maturity = model.asset_value_at(self.maturity, self.underlying_index)?;
        let values = payoffs::call_payoff(&underlying_at_maturity, self.strike);
        discount_to_evaluation_time(&values, self.maturity, evaluation_time, model)
    }
}
