//! Step function with a single threshold.

use serde::{Deserialize, Serialize};

use super::{check_scale, derivative_order, FittedFunction, UnivariateFunction};
use crate::error::Result;

/// `f(x) = below` for `x < threshold`, `above` otherwise.
///
/// Derivatives of any positive order are the zero constant; the jump at the
/// threshold is not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFunction {
    threshold: f64,
    below: f64,
    above: f64,
}

impl ThresholdFunction {
    pub fn new(threshold: f64, below: f64, above: f64) -> Self {
        Self {
            threshold,
            below,
            above,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn below(&self) -> f64 {
        self.below
    }

    pub fn above(&self) -> f64 {
        self.above
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.threshold, self.below * s, self.above * s)
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        Ok(match derivative_order(order)? {
            0 => (*self).into(),
            _ => FittedFunction::zero(),
        })
    }

    /// Threshold functions have no power terms.
    pub fn coefficient(&self, _power: f64) -> f64 {
        0.0
    }

    pub fn parameter_count(&self) -> usize {
        3
    }

    pub fn parameters(&self) -> Vec<f64> {
        vec![self.threshold, self.below, self.above]
    }

    /// Moves the threshold to `threshold * h`.
    ///
    /// A negative `h` mirrors the step, so the levels swap sides. The value
    /// exactly at the mirrored threshold is then `below` rather than `above`.
    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        if h < 0.0 {
            Ok(Self::new(self.threshold * h, self.above, self.below))
        } else {
            Ok(Self::new(self.threshold * h, self.below, self.above))
        }
    }
}

impl UnivariateFunction for ThresholdFunction {
    fn value(&self, x: f64) -> f64 {
        if x < self.threshold {
            self.below
        } else {
            self.above
        }
    }
}
