// src/stochastic/scenario_vector.rs
//! Vectorized Random Variables
//!
//! # Representation
//!
//! A `ScenarioVector` holds one `f64` per Monte Carlo scenario. A vector may
//! also be *constant*: a single value valid for every scenario. Constants
//! broadcast against scenario-valued vectors of any length, so numeraires and
//! weights of deterministic models cost one float instead of N.
//!
//! # Elementwise Semantics
//!
//! Every operation maps scenario `i` of the operands to scenario `i` of the
//! result and returns a fresh vector; nothing is mutated in place.
//! ```text
//! floor(X, c)_i       = max(X_i, c)
//! cap(X, c)_i         = min(X_i, c)
//! select(T, A, B)_i   = A_i  if T_i ≥ 0
//!                       B_i  otherwise
//! ```
//!
//! The kernels are branch-free: `floor` and `cap` are `f64::max` and
//! `f64::min`, `select` picks the operand bits with a mask built from the
//! comparison. The selected value is returned bit-for-bit.
//!
//! # Parallelism
//!
//! Kernels on vectors with at least [`PARALLEL_THRESHOLD`] scenarios run on
//! the rayon pool through ndarray's parallel `Zip`. Results do not depend on
//! the thread count.

use crate::error::{PricingError, PricingResult};
use ndarray::{Array1, Zip};
use std::borrow::Cow;

/// Minimum scenario count for which elementwise kernels run in parallel.
pub const PARALLEL_THRESHOLD: usize = 16_384;

#[derive(Debug, Clone, PartialEq)]
enum Realizations {
    Constant(f64),
    Scenarios(Array1<f64>),
}

/// Per-scenario values of a random variable
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioVector {
    realizations: Realizations,
}

/// `if_non_negative` where `trigger ≥ 0`, else `if_negative`, without a branch.
#[inline]
fn select_bits(trigger: f64, if_non_negative: f64, if_negative: f64) -> f64 {
    let mask = ((trigger >= 0.0) as u64).wrapping_neg();
    f64::from_bits((if_non_negative.to_bits() & mask) | (if_negative.to_bits() & !mask))
}

fn map_unary<F>(values: &Array1<f64>, f: F) -> Array1<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    if values.len() >= PARALLEL_THRESHOLD {
        Zip::from(values).par_map_collect(|&x| f(x))
    } else {
        values.mapv(f)
    }
}

fn map_binary<F>(left: &Array1<f64>, right: &Array1<f64>, f: F) -> Array1<f64>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    let zip = Zip::from(left).and(right);
    if left.len() >= PARALLEL_THRESHOLD {
        zip.par_map_collect(|&x, &y| f(x, y))
    } else {
        zip.map_collect(|&x, &y| f(x, y))
    }
}

impl ScenarioVector {
    /// Deterministic vector: `value` in every scenario.
    pub fn constant(value: f64) -> Self {
        ScenarioVector {
            realizations: Realizations::Constant(value),
        }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::from_array(Array1::from(values))
    }

    pub fn from_array(values: Array1<f64>) -> Self {
        ScenarioVector {
            realizations: Realizations::Scenarios(values),
        }
    }

    /// Number of scenarios; 1 for a constant vector.
    pub fn size(&self) -> usize {
        match &self.realizations {
            Realizations::Constant(_) => 1,
            Realizations::Scenarios(values) => values.len(),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.realizations, Realizations::Constant(_))
    }

    /// Value in scenario `index`. Constants answer for any index.
    pub fn get(&self, index: usize) -> Option<f64> {
        match &self.realizations {
            Realizations::Constant(value) => Some(*value),
            Realizations::Scenarios(values) => values.get(index).copied(),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match &self.realizations {
            Realizations::Constant(value) => vec![*value],
            Realizations::Scenarios(values) => values.to_vec(),
        }
    }

    /// Scenario count shared by the scenario-valued operands, if any.
    fn common_size(operation: &str, operands: &[&ScenarioVector]) -> PricingResult<Option<usize>> {
        let mut size: Option<usize> = None;
        for operand in operands {
            if let Realizations::Scenarios(values) = &operand.realizations {
                match size {
                    None => size = Some(values.len()),
                    Some(n) if n != values.len() => {
                        return Err(PricingError::ShapeMismatch {
                            operation: operation.to_string(),
                            left: n,
                            right: values.len(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(size)
    }

    /// Scenario values, broadcasting a constant to `n` scenarios.
    fn broadcast(&self, n: usize) -> Cow<'_, Array1<f64>> {
        match &self.realizations {
            Realizations::Constant(value) => Cow::Owned(Array1::from_elem(n, *value)),
            Realizations::Scenarios(values) => Cow::Borrowed(values),
        }
    }

    fn apply<F>(&self, f: F) -> ScenarioVector
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        match &self.realizations {
            Realizations::Constant(value) => ScenarioVector::constant(f(*value)),
            Realizations::Scenarios(values) => ScenarioVector::from_array(map_unary(values, f)),
        }
    }

    fn combine<F>(&self, other: &ScenarioVector, operation: &str, f: F) -> PricingResult<ScenarioVector>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        let result = match (&self.realizations, &other.realizations) {
            (Realizations::Constant(x), Realizations::Constant(y)) => ScenarioVector::constant(f(*x, *y)),
            (Realizations::Constant(x), Realizations::Scenarios(ys)) => {
                let x = *x;
                ScenarioVector::from_array(map_unary(ys, |y| f(x, y)))
            }
            (Realizations::Scenarios(xs), Realizations::Constant(y)) => {
                let y = *y;
                ScenarioVector::from_array(map_unary(xs, |x| f(x, y)))
            }
            (Realizations::Scenarios(xs), Realizations::Scenarios(ys)) => {
                if xs.len() != ys.len() {
                    return Err(PricingError::ShapeMismatch {
                        operation: operation.to_string(),
                        left: xs.len(),
                        right: ys.len(),
                    });
                }
                ScenarioVector::from_array(map_binary(xs, ys, f))
            }
        };
        Ok(result)
    }

    pub fn add_scalar(&self, value: f64) -> ScenarioVector {
        self.apply(|x| x + value)
    }

    pub fn sub_scalar(&self, value: f64) -> ScenarioVector {
        self.apply(|x| x - value)
    }

    pub fn mult_scalar(&self, value: f64) -> ScenarioVector {
        self.apply(|x| x * value)
    }

    pub fn div_scalar(&self, value: f64) -> ScenarioVector {
        self.apply(|x| x / value)
    }

    pub fn add(&self, other: &ScenarioVector) -> PricingResult<ScenarioVector> {
        self.combine(other, "add", |x, y| x + y)
    }

    pub fn sub(&self, other: &ScenarioVector) -> PricingResult<ScenarioVector> {
        self.combine(other, "sub", |x, y| x - y)
    }

    pub fn mult(&self, other: &ScenarioVector) -> PricingResult<ScenarioVector> {
        self.combine(other, "mult", |x, y| x * y)
    }

    pub fn div(&self, other: &ScenarioVector) -> PricingResult<ScenarioVector> {
        self.combine(other, "div", |x, y| x / y)
    }

    /// Clamp every scenario from below: `max(X_i, threshold)`.
    pub fn floor(&self, threshold: f64) -> ScenarioVector {
        self.apply(|x| x.max(threshold))
    }

    /// Clamp every scenario from above: `min(X_i, ceiling)`.
    pub fn cap(&self, ceiling: f64) -> ScenarioVector {
        self.apply(|x| x.min(ceiling))
    }

    /// Elementwise ternary on the sign of `trigger`.
    ///
    /// Scenario `i` of the result is `if_non_negative[i]` where
    /// `trigger[i] ≥ 0` and `if_negative[i]` otherwise (including NaN
    /// triggers). Any operand may be constant.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if two scenario-valued operands differ in length.
    pub fn select(
        trigger: &ScenarioVector,
        if_non_negative: &ScenarioVector,
        if_negative: &ScenarioVector,
    ) -> PricingResult<ScenarioVector> {
        let n = match Self::common_size("select", &[trigger, if_non_negative, if_negative])? {
            Some(n) => n,
            None => {
                // all three constant
                let t = trigger.get(0).unwrap_or(f64::NAN);
                let a = if_non_negative.get(0).unwrap_or(f64::NAN);
                let b = if_negative.get(0).unwrap_or(f64::NAN);
                return Ok(ScenarioVector::constant(select_bits(t, a, b)));
            }
        };

        let t = trigger.broadcast(n);
        let a = if_non_negative.broadcast(n);
        let b = if_negative.broadcast(n);
        let zip = Zip::from(&*t).and(&*a).and(&*b);
        let selected = if n >= PARALLEL_THRESHOLD {
            zip.par_map_collect(|&t, &a, &b| select_bits(t, a, b))
        } else {
            zip.map_collect(|&t, &a, &b| select_bits(t, a, b))
        };
        Ok(ScenarioVector::from_array(selected))
    }

    /// Sample mean across scenarios.
    pub fn average(&self) -> f64 {
        match &self.realizations {
            Realizations::Constant(value) => *value,
            Realizations::Scenarios(values) => values.mean().unwrap_or(f64::NAN),
        }
    }

    /// Population variance across scenarios; 0 for constants.
    pub fn variance(&self) -> f64 {
        match &self.realizations {
            Realizations::Constant(_) => 0.0,
            Realizations::Scenarios(values) => {
                if values.is_empty() {
                    return f64::NAN;
                }
                let mean = self.average();
                values.fold(0.0, |acc, &x| acc + (x - mean) * (x - mean)) / values.len() as f64
            }
        }
    }

    /// Standard error of the sample mean.
    pub fn standard_error(&self) -> f64 {
        (self.variance() / self.size() as f64).sqrt()
    }

    /// Number of NaN or infinite scenario values.
    pub fn count_non_finite(&self) -> usize {
        match &self.realizations {
            Realizations::Constant(value) => usize::from(!value.is_finite()),
            Realizations::Scenarios(values) => values.iter().filter(|x| !x.is_finite()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_scalar_arithmetic() {
        let x = ScenarioVector::from_vec(vec![1.0, 2.0, 4.0]);

        assert_eq!(x.sub_scalar(1.0).to_vec(), vec![0.0, 1.0, 3.0]);
        assert_eq!(x.mult_scalar(-1.0).to_vec(), vec![-1.0, -2.0, -4.0]);
        assert_eq!(x.div_scalar(2.0).to_vec(), vec![0.5, 1.0, 2.0]);
        assert_eq!(x.add_scalar(0.5).to_vec(), vec![1.5, 2.5, 4.5]);
        // inputs are never mutated
        assert_eq!(x.to_vec(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_vector_arithmetic() {
        let x = ScenarioVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = ScenarioVector::from_vec(vec![2.0, 4.0, 6.0]);

        assert_eq!(x.mult(&y).unwrap().to_vec(), vec![2.0, 8.0, 18.0]);
        assert_eq!(y.div(&x).unwrap().to_vec(), vec![2.0, 2.0, 2.0]);
        assert_eq!(y.sub(&x).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(x.add(&y).unwrap().to_vec(), vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_constant_broadcasts() {
        let x = ScenarioVector::from_vec(vec![1.0, 2.0, 3.0]);
        let two = ScenarioVector::constant(2.0);

        assert_eq!(x.mult(&two).unwrap().to_vec(), vec![2.0, 4.0, 6.0]);
        assert_eq!(two.div(&x).unwrap().to_vec(), vec![2.0, 1.0, 2.0 / 3.0]);

        let product = two.mult(&two).unwrap();
        assert!(product.is_constant());
        assert_eq!(product.average(), 4.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let x = ScenarioVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = ScenarioVector::from_vec(vec![1.0, 2.0]);

        match x.mult(&y) {
            Err(PricingError::ShapeMismatch { operation, left, right }) => {
                assert_eq!(operation, "mult");
                assert_eq!(left, 3);
                assert_eq!(right, 2);
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
        assert!(x.div(&y).is_err());
        assert!(ScenarioVector::select(&x, &y, &ScenarioVector::constant(0.0)).is_err());
    }

    #[test]
    fn test_floor() {
        let x = ScenarioVector::from_vec(vec![-5.0, 0.0, 5.0]);
        assert_eq!(x.floor(0.0).to_vec(), vec![0.0, 0.0, 5.0]);
        assert_eq!(x.floor(1.0).to_vec(), vec![1.0, 1.0, 5.0]);
    }

    #[test]
    fn test_cap() {
        let x = ScenarioVector::from_vec(vec![-5.0, 0.0, 0.5, 5.0]);
        assert_eq!(x.cap(1.0).to_vec(), vec![-5.0, 0.0, 0.5, 1.0]);
        assert_eq!(ScenarioVector::constant(f64::INFINITY).cap(1.0).average(), 1.0);
    }

    #[test]
    fn test_select() {
        let trigger = ScenarioVector::from_vec(vec![-1.0, 0.0, 2.0, -0.0]);
        let a = ScenarioVector::from_vec(vec![10.0, 20.0, 30.0, 40.0]);
        let b = ScenarioVector::constant(-7.0);

        let selected = ScenarioVector::select(&trigger, &a, &b).unwrap();
        assert_eq!(selected.to_vec(), vec![-7.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_select_nan_trigger_takes_negative_branch() {
        let trigger = ScenarioVector::from_vec(vec![f64::NAN, 1.0]);
        let a = ScenarioVector::constant(1.0);
        let b = ScenarioVector::constant(2.0);

        let selected = ScenarioVector::select(&trigger, &a, &b).unwrap();
        assert_eq!(selected.to_vec(), vec![2.0, 1.0]);
    }

    #[test]
    fn test_select_is_exact() {
        let trigger = ScenarioVector::constant(1.0);
        let a = ScenarioVector::from_vec(vec![0.1 + 0.2, f64::MIN_POSITIVE, 1e308]);
        let b = ScenarioVector::constant(f64::INFINITY);

        let selected = ScenarioVector::select(&trigger, &a, &b).unwrap();
        for (x, y) in selected.to_vec().iter().zip(a.to_vec().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_select_all_constant() {
        let selected = ScenarioVector::select(
            &ScenarioVector::constant(-3.0),
            &ScenarioVector::constant(1.0),
            &ScenarioVector::constant(2.0),
        )
        .unwrap();
        assert!(selected.is_constant());
        assert_eq!(selected.average(), 2.0);
    }

    #[test]
    fn test_parallel_kernels_match_serial() {
        let n = PARALLEL_THRESHOLD + 17;
        let values: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let x = ScenarioVector::from_vec(values.clone());

        let floored = x.floor(0.0).to_vec();
        let squared = x.mult(&x).unwrap().to_vec();
        let selected = ScenarioVector::select(&x, &ScenarioVector::constant(1.0), &x).unwrap().to_vec();

        for i in 0..n {
            assert_eq!(floored[i], values[i].max(0.0));
            assert_eq!(squared[i], values[i] * values[i]);
            assert_eq!(selected[i], if values[i] >= 0.0 { 1.0 } else { values[i] });
        }
    }

    #[test]
    fn test_reductions() {
        let x = ScenarioVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        assert_abs_diff_eq!(x.average(), 2.5, epsilon = 1e-15);
        assert_abs_diff_eq!(x.variance(), 1.25, epsilon = 1e-15);
        assert_abs_diff_eq!(x.standard_error(), (1.25f64 / 4.0).sqrt(), epsilon = 1e-15);

        let c = ScenarioVector::constant(3.0);
        assert_eq!(c.average(), 3.0);
        assert_eq!(c.variance(), 0.0);
        assert_eq!(c.size(), 1);
    }

    #[test]
    fn test_count_non_finite() {
        let x = ScenarioVector::from_vec(vec![1.0, f64::INFINITY, f64::NAN, 2.0]);
        assert_eq!(x.count_non_finite(), 2);
        assert_eq!(ScenarioVector::constant(1.0).count_non_finite(), 0);
    }
}
