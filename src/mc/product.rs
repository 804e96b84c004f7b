// src/mc/product.rs
use crate::error::PricingResult;
use crate::models::SimulationModel;
use crate::stochastic::ScenarioVector;

/// A product valued scenario by scenario inside a `SimulationModel`.
pub trait MonteCarloProduct {
    /// Per-scenario value, discounted and weighted to `evaluation_time`.
    ///
    /// The sample mean of the result is the Monte Carlo price.
    fn value(&self, evaluation_time: f64, model: &dyn SimulationModel) -> PricingResult<ScenarioVector>;

    /// Monte Carlo price at `evaluation_time`: the average of [`Self::value`].
    fn price(&self, evaluation_time: f64, model: &dyn SimulationModel) -> PricingResult<f64> {
        Ok(self.value(evaluation_time, model)?.average())
    }
}

/// Move a payoff paid at `payment_time` to `evaluation_time`.
///
/// # Formula
/// ```text
/// V(t) = X / N(T) * w(T) * N(t) / w(t)
/// ```
/// where `N` is the numeraire and `w` the Monte Carlo weights. The first
/// factor expresses the cashflow under the pricing measure at `T`, the second
/// re-expresses it relative to the numeraire and measure at `t`.
pub fn discount_to_evaluation_time(
    payoff: &ScenarioVector,
    payment_time: f64,
    evaluation_time: f64,
    model: &dyn SimulationModel,
) -> PricingResult<ScenarioVector> {
    let numeraire_at_payment = model.numeraire(payment_time)?;
    let weights_at_payment = model.monte_carlo_weights(payment_time)?;
    let values = payoff.div(&numeraire_at_payment)?.mult(&weights_at_payment)?;

    let numeraire_at_evaluation = model.numeraire(evaluation_time)?;
    let weights_at_evaluation = model.monte_carlo_weights(evaluation_time)?;
    values.mult(&numeraire_at_evaluation)?.div(&weights_at_evaluation)
}
