// src/mc/barrier_option.rs
//! Down-and-Out Barrier Call
//!
//! # Payoff
//!
//! ```text
//! V(T) = max(S_T - K, 0)   if S_{t_i} > H for every grid time t_i < T
//!      = 0                  otherwise
//! ```
//!
//! The barrier is monitored on the model's own time grid, at every grid time
//! strictly before maturity. Monitoring is fully vectorized: a running breach
//! detector (see [`crate::mc::payoffs`]) is multiplied through the path and
//! its sign decides the payoff via `ScenarioVector::select`.
//!
//! # Valuation
//!
//! The payoff is expressed relative to the numeraire and Monte Carlo weights
//! at maturity, then moved to the evaluation time:
//! ```text
//! V(t) = V(T) / N(T) * w(T) * N(t) / w(t)
//! ```

use super::payoffs;
use super::product::{discount_to_evaluation_time, MonteCarloProduct};
use crate::error::{validation::*, PricingError, PricingResult};
use crate::models::SimulationModel;
use crate::stochastic::ScenarioVector;

/// Immutable contract terms of a barrier option
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierProductSpec {
    pub maturity: f64,
    pub strike: f64,
    pub barrier: f64,
    pub underlying_index: usize,
}

impl BarrierProductSpec {
    /// Terms on asset 0 (single-asset case).
    pub fn new(maturity: f64, strike: f64, barrier: f64) -> Self {
        BarrierProductSpec {
            maturity,
            strike,
            barrier,
            underlying_index: 0,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        validate_positive("maturity", self.maturity)?;
        validate_finite("maturity", self.maturity)?;
        validate_finite("strike", self.strike)?;
        validate_finite("barrier", self.barrier)?;
        Ok(())
    }
}

/// Down-and-out barrier call valued in a `SimulationModel`
#[derive(Clone, Debug, PartialEq)]
pub struct BarrierOption {
    spec: BarrierProductSpec,
}

impl BarrierOption {
    /// Barrier call on asset 0 (single-asset case).
    pub fn new(maturity: f64, strike: f64, barrier: f64) -> PricingResult<Self> {
        Self::from_spec(BarrierProductSpec::new(maturity, strike, barrier))
    }

    pub fn with_underlying(
        maturity: f64,
        strike: f64,
        underlying_index: usize,
        barrier: f64,
    ) -> PricingResult<Self> {
        Self::from_spec(BarrierProductSpec {
            maturity,
            strike,
            barrier,
            underlying_index,
        })
    }

    pub fn from_spec(spec: BarrierProductSpec) -> PricingResult<Self> {
        spec.validate()?;
        Ok(BarrierOption { spec })
    }

    pub fn spec(&self) -> &BarrierProductSpec {
        &self.spec
    }

    /// Running breach detector over the grid times before maturity.
    ///
    /// Positive in a scenario iff the asset stayed strictly above the barrier
    /// at every monitoring point. Positive entries are bounded by 1, so the
    /// detector stays finite on arbitrarily long grids.
    ///
    /// # Errors
    ///
    /// `CalculationFailure` if maturity is not on the grid, if there is no
    /// grid time before maturity, or if the model cannot supply a value.
    pub fn breach_detector(&self, model: &dyn SimulationModel) -> PricingResult<ScenarioVector> {
        let maturity_index = model.time_index(self.spec.maturity)?;
        if maturity_index == 0 {
            return Err(PricingError::calculation(
                "barrier option",
                format!(
                    "no monitoring time before maturity {} on the model grid",
                    self.spec.maturity
                ),
            ));
        }

        let first = model.asset_value(0, self.spec.underlying_index)?;
        let mut non_finite = first.count_non_finite();
        let mut detector = payoffs::initial_breach_detector(&first, self.spec.barrier);
        for time_index in 1..maturity_index {
            let underlying = model.asset_value(time_index, self.spec.underlying_index)?;
            non_finite += underlying.count_non_finite();
            detector = payoffs::update_breach_detector(&detector, &underlying, self.spec.barrier)?;
        }

        if non_finite > 0 {
            eprintln!(
                "WARNING!: {} monitored asset values are not finite; barrier status may be misread.",
                non_finite
            );
        }

        Ok(detector)
    }
}

impl MonteCarloProduct for BarrierOption {
    fn value(&self, evaluation_time: f64, model: &dyn SimulationModel) -> PricingResult<ScenarioVector> {
        let detector = self.breach_detector(model)?;

        let underlying_at_maturity = model.asset_value_at(self.spec.maturity, self.spec.underlying_index)?;
        let call = payoffs::call_payoff(&underlying_at_maturity, self.spec.strike);
        let values = payoffs::knock_out(&detector, &call)?;

        discount_to_evaluation_time(&values, self.spec.maturity, evaluation_time, model)
    }
}
