//! Vectorized Option Payoffs
//!
//! # Mathematical Definitions
//!
//! Payoffs are computed for all scenarios at once on `ScenarioVector`s, with
//! no per-path branching:
//! - **Call**: `max(S_T - K, 0) = floor(S_T - K, 0)`
//! - **Knock-out**: `select(-D, 0, X)`, zero wherever the breach detector
//!   `D ≤ 0`, `X` elsewhere
//!
//! # Breach Detector
//!
//! For monitoring values `S_0, ..., S_{n-1}` and barrier `H`:
//! ```text
//! D_0 = S_0 - H
//! D_i = D_{i-1} * max(S_i - H, 0)       i ≥ 1
//! ```
//! `D > 0` exactly when every monitored value stayed strictly above `H`.
//! The first term is not floored: `S_0 < H` gives a negative detector, which
//! stays `≤ 0` after multiplying by non-negative factors.
//!
//! Only the sign of `D` is ever read, so after each update positive values
//! are clamped into `[f64::MIN_POSITIVE, 1]`. Zero and negative values are
//! left untouched. The raw product would overflow to `inf` after a few
//! hundred points far above the barrier (and `inf * 0` is NaN), or underflow
//! to 0 when the asset trades just above a small barrier.

use crate::error::PricingResult;
use crate::stochastic::ScenarioVector;

/// Call payoff `max(S_T - K, 0)` per scenario.
pub fn call_payoff(terminal: &ScenarioVector, strike: f64) -> ScenarioVector {
    terminal.sub_scalar(strike).floor(0.0)
}

/// Start the breach detector at the first monitoring point.
pub fn initial_breach_detector(first_value: &ScenarioVector, barrier: f64) -> ScenarioVector {
    first_value.sub_scalar(barrier)
}

/// Fold one more monitoring point into the breach detector.
pub fn update_breach_detector(
    detector: &ScenarioVector,
    value: &ScenarioVector,
    barrier: f64,
) -> PricingResult<ScenarioVector> {
    let product = detector.mult(&value.sub_scalar(barrier).floor(0.0))?.cap(1.0);
    ScenarioVector::select(
        &product.mult_scalar(-1.0),
        &product,
        &product.floor(f64::MIN_POSITIVE),
    )
}

/// Zero where the detector signals a breach (`D ≤ 0`), `payoff` elsewhere.
pub fn knock_out(detector: &ScenarioVector, payoff: &ScenarioVector) -> PricingResult<ScenarioVector> {
    ScenarioVector::select(&detector.mult_scalar(-1.0), &ScenarioVector::constant(0.0), payoff)
}
