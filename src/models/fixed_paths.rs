// src/models/fixed_paths.rs
//! Deterministic model replaying given asset paths.
//!
//! Useful for testing products scenario by scenario: every path, numeraire and
//! weight is supplied by the caller. Without explicit numeraires the model uses
//! `e^{rt}` for a flat rate (0 by default); without explicit weights every
//! scenario weighs `1/N`.

use super::model::SimulationModel;
use super::time_discretization::TimeDiscretization;
use crate::error::{PricingError, PricingResult};
use crate::stochastic::ScenarioVector;

pub struct FixedPathModel {
    discretization: TimeDiscretization,
    number_of_paths: usize,
    assets: Vec<Vec<ScenarioVector>>, // [asset][time index]
    rate: f64,
    numeraires: Option<Vec<ScenarioVector>>,
    weights: Option<Vec<ScenarioVector>>,
}

/// Turn scenario-major rows into one vector per time index.
fn by_time(times: usize, paths: &[Vec<f64>]) -> PricingResult<Vec<ScenarioVector>> {
    if paths.is_empty() {
        return Err(PricingError::InvalidConfiguration {
            field: "paths".to_string(),
            reason: "at least one scenario is required".to_string(),
        });
    }
    if let Some((scenario, path)) = paths.iter().enumerate().find(|(_, p)| p.len() != times) {
        return Err(PricingError::InvalidConfiguration {
            field: "paths".to_string(),
            reason: format!(
                "scenario {} has {} values but the grid has {} times",
                scenario,
                path.len(),
                times
            ),
        });
    }
    Ok((0..times)
        .map(|t| ScenarioVector::from_vec(paths.iter().map(|path| path[t]).collect()))
        .collect())
}

impl FixedPathModel {
    /// Single-asset model; `paths[scenario][time_index]`.
    pub fn new(times: Vec<f64>, paths: Vec<Vec<f64>>) -> PricingResult<Self> {
        let discretization = TimeDiscretization::from_times(times)?;
        let asset = by_time(discretization.number_of_times(), &paths)?;
        Ok(FixedPathModel {
            discretization,
            number_of_paths: paths.len(),
            assets: vec![asset],
            rate: 0.0,
            numeraires: None,
            weights: None,
        })
    }

    /// Add another asset with the same scenario count.
    pub fn with_asset(mut self, paths: Vec<Vec<f64>>) -> PricingResult<Self> {
        self.check_scenarios("asset", paths.len())?;
        self.assets
            .push(by_time(self.discretization.number_of_times(), &paths)?);
        Ok(self)
    }

    /// Deterministic numeraire `e^{rate * t}`.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Explicit numeraire per grid time.
    pub fn with_numeraires(mut self, numeraires: Vec<ScenarioVector>) -> PricingResult<Self> {
        self.check_series("numeraires", &numeraires)?;
        self.numeraires = Some(numeraires);
        Ok(self)
    }

    /// Explicit Monte Carlo weights per grid time.
    pub fn with_weights(mut self, weights: Vec<ScenarioVector>) -> PricingResult<Self> {
        self.check_series("weights", &weights)?;
        self.weights = Some(weights);
        Ok(self)
    }

    fn check_scenarios(&self, field: &str, size: usize) -> PricingResult<()> {
        if size != self.number_of_paths {
            return Err(PricingError::ShapeMismatch {
                operation: format!("FixedPathModel::{}", field),
                left: self.number_of_paths,
                right: size,
            });
        }
        Ok(())
    }

    fn check_series(&self, field: &str, series: &[ScenarioVector]) -> PricingResult<()> {
        if series.len() != self.discretization.number_of_times() {
            return Err(PricingError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!(
                    "{} values given for {} grid times",
                    series.len(),
                    self.discretization.number_of_times()
                ),
            });
        }
        for vector in series.iter().filter(|v| !v.is_constant()) {
            self.check_scenarios(field, vector.size())?;
        }
        Ok(())
    }
}

impl SimulationModel for FixedPathModel {
    fn time_index(&self, time: f64) -> PricingResult<usize> {
        self.discretization.time_index(time).ok_or_else(|| {
            PricingError::calculation("fixed path model", format!("time {} is not on the grid", time))
        })
    }

    fn asset_value(&self, time_index: usize, asset_index: usize) -> PricingResult<ScenarioVector> {
        let asset = self.assets.get(asset_index).ok_or_else(|| {
            PricingError::calculation(
                "fixed path model",
                format!("unknown asset index {} ({} assets)", asset_index, self.assets.len()),
            )
        })?;
        asset.get(time_index).cloned().ok_or_else(|| {
            PricingError::calculation(
                "fixed path model",
                format!("time index {} out of range (0..{})", time_index, asset.len()),
            )
        })
    }

    fn numeraire(&self, time: f64) -> PricingResult<ScenarioVector> {
        match &self.numeraires {
            Some(numeraires) => Ok(numeraires[self.time_index(time)?].clone()),
            None => Ok(ScenarioVector::constant((self.rate * time).exp())),
        }
    }

    fn monte_carlo_weights(&self, time: f64) -> PricingResult<ScenarioVector> {
        match &self.weights {
            Some(weights) => Ok(weights[self.time_index(time)?].clone()),
            None => Ok(ScenarioVector::constant(1.0 / self.number_of_paths as f64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_paths_by_time() {
        let model = FixedPathModel::new(
            vec![0.0, 0.5, 1.0],
            vec![vec![100.0, 90.0, 80.0], vec![100.0, 110.0, 120.0]],
        )
        .unwrap();

        assert_eq!(model.asset_value(1, 0).unwrap().to_vec(), vec![90.0, 110.0]);
        assert_eq!(model.asset_value_at(1.0, 0).unwrap().to_vec(), vec![80.0, 120.0]);
        assert_eq!(model.monte_carlo_weights(0.5).unwrap().average(), 0.5);
        assert_eq!(model.numeraire(1.0).unwrap().average(), 1.0);
    }

    #[test]
    fn test_ragged_paths_rejected() {
        let result = FixedPathModel::new(vec![0.0, 1.0], vec![vec![100.0, 90.0], vec![100.0]]);
        assert!(matches!(result, Err(PricingError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_unknown_asset_and_time() {
        let model = FixedPathModel::new(vec![0.0, 1.0], vec![vec![100.0, 90.0]]).unwrap();
        assert!(matches!(
            model.asset_value(0, 1),
            Err(PricingError::CalculationFailure { .. })
        ));
        assert!(matches!(
            model.asset_value(2, 0),
            Err(PricingError::CalculationFailure { .. })
        ));
        assert!(matches!(
            model.time_index(0.5),
            Err(PricingError::CalculationFailure { .. })
        ));
    }

    #[test]
    fn test_second_asset() {
        let model = FixedPathModel::new(vec![0.0, 1.0], vec![vec![100.0, 90.0]])
            .unwrap()
            .with_asset(vec![vec![50.0, 55.0]])
            .unwrap();
        assert_eq!(model.asset_value(1, 1).unwrap().to_vec(), vec![55.0]);
        assert!(model.with_asset(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).is_err());
    }

    #[test]
    fn test_explicit_numeraires_need_grid_times() {
        let model = FixedPathModel::new(vec![0.0, 1.0], vec![vec![100.0, 90.0]])
            .unwrap()
            .with_numeraires(vec![ScenarioVector::constant(1.0), ScenarioVector::constant(1.1)])
            .unwrap();
        assert_eq!(model.numeraire(1.0).unwrap().average(), 1.1);
        assert!(model.numeraire(0.3).is_err());
    }
}
