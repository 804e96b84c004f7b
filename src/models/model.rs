// src/models/model.rs
use crate::error::PricingResult;
use crate::stochastic::ScenarioVector;

/// Read-only view of a Monte Carlo simulation of asset prices.
///
/// Every vector returned by one model instance has the same scenario count
/// (constants broadcast). Failures are reported as `CalculationFailure`.
pub trait SimulationModel {
    /// Index of `time` on the model's discretization grid.
    fn time_index(&self, time: f64) -> PricingResult<usize>;

    /// Simulated values of asset `asset_index` at grid index `time_index`.
    fn asset_value(&self, time_index: usize, asset_index: usize) -> PricingResult<ScenarioVector>;

    /// Simulated values of asset `asset_index` at `time` (must be on the grid).
    fn asset_value_at(&self, time: f64, asset_index: usize) -> PricingResult<ScenarioVector> {
        let time_index = self.time_index(time)?;
        self.asset_value(time_index, asset_index)
    }

    /// Numeraire N(t) per scenario.
    fn numeraire(&self, time: f64) -> PricingResult<ScenarioVector>;

    /// Monte Carlo probability weights per scenario at `time`.
    fn monte_carlo_weights(&self, time: f64) -> PricingResult<ScenarioVector>;
}
