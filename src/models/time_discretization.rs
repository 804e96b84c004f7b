// src/models/time_discretization.rs
//! Simulation Time Grid
//!
//! Simulated values exist only on a finite, strictly increasing set of times
//! `t_0 < t_1 < ... < t_n`. Products address the grid either by index or by
//! time; a time resolves to index `i` when it lies within
//! [`TIME_TOLERANCE`] (relative to `max(1, |t|)`) of `t_i`, which absorbs the
//! rounding of `t_0 + i * dt`.

use crate::error::{validation::*, PricingError, PricingResult};

/// Relative tolerance used to match a requested time against a grid time.
pub const TIME_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeDiscretization {
    times: Vec<f64>,
}

impl TimeDiscretization {
    /// Equidistant grid `initial, initial + dt, ..., initial + steps * dt`.
    pub fn new(initial: f64, number_of_steps: usize, delta: f64) -> PricingResult<Self> {
        validate_finite("initial", initial)?;
        validate_steps(number_of_steps)?;
        validate_positive("delta", delta)?;

        let times = (0..=number_of_steps)
            .map(|i| initial + i as f64 * delta)
            .collect();
        Ok(TimeDiscretization { times })
    }

    /// Grid from explicit times; must be non-empty, finite and strictly increasing.
    pub fn from_times(times: Vec<f64>) -> PricingResult<Self> {
        if times.is_empty() {
            return Err(PricingError::InvalidConfiguration {
                field: "times".to_string(),
                reason: "time discretization needs at least one time".to_string(),
            });
        }
        for &t in &times {
            validate_finite("time", t)?;
        }
        if let Some(pair) = times.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(PricingError::InvalidConfiguration {
                field: "times".to_string(),
                reason: format!("times must be strictly increasing ({} then {})", pair[0], pair[1]),
            });
        }
        Ok(TimeDiscretization { times })
    }

    pub fn number_of_times(&self) -> usize {
        self.times.len()
    }

    pub fn number_of_time_steps(&self) -> usize {
        self.times.len() - 1
    }

    pub fn time(&self, time_index: usize) -> Option<f64> {
        self.times.get(time_index).copied()
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Index of the grid time matching `time`, if any.
    pub fn time_index(&self, time: f64) -> Option<usize> {
        if !time.is_finite() {
            return None;
        }
        let tolerance = TIME_TOLERANCE * time.abs().max(1.0);
        // first grid time not below the tolerance band
        let candidate = self.times.partition_point(|&t| t < time - tolerance);
        match self.times.get(candidate) {
            Some(&t) if (t - time).abs() <= tolerance => Some(candidate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equidistant_grid() {
        let grid = TimeDiscretization::new(0.0, 100, 0.01).unwrap();
        assert_eq!(grid.number_of_times(), 101);
        assert_eq!(grid.number_of_time_steps(), 100);
        assert_eq!(grid.time(0), Some(0.0));
        assert!((grid.last_time() - 1.0).abs() < 1e-12);
        assert_eq!(grid.time(101), None);
    }

    #[test]
    fn test_time_index_lookup() {
        let grid = TimeDiscretization::new(0.0, 100, 0.01).unwrap();
        assert_eq!(grid.time_index(0.0), Some(0));
        assert_eq!(grid.time_index(1.0), Some(100));
        // 0.1 + 0.2 style rounding still resolves
        assert_eq!(grid.time_index(0.1 + 0.2), Some(30));
        assert_eq!(grid.time_index(0.305), None);
        assert_eq!(grid.time_index(1.5), None);
        assert_eq!(grid.time_index(-0.01), None);
        assert_eq!(grid.time_index(f64::NAN), None);
    }

    #[test]
    fn test_from_times_validation() {
        assert!(TimeDiscretization::from_times(vec![]).is_err());
        assert!(TimeDiscretization::from_times(vec![0.0, 0.5, 0.5]).is_err());
        assert!(TimeDiscretization::from_times(vec![0.0, f64::NAN]).is_err());

        let grid = TimeDiscretization::from_times(vec![0.0, 0.25, 1.0]).unwrap();
        assert_eq!(grid.time_index(0.25), Some(1));
        assert_eq!(grid.time_index(1.0), Some(2));
    }

    #[test]
    fn test_invalid_equidistant_parameters() {
        assert!(TimeDiscretization::new(0.0, 0, 0.1).is_err());
        assert!(TimeDiscretization::new(0.0, 10, 0.0).is_err());
        assert!(TimeDiscretization::new(f64::INFINITY, 10, 0.1).is_err());
    }
}
