//! Power-law models.
//!
//! This module provides `a * x^e` with a real exponent, its fixed-exponent
//! sesquilinear special case `a * x^1.5` (Hertzian contact of a spherical
//! indenter), and sums of power terms with distinct exponents.
//!
//! A negative base with a non-integer exponent evaluates to NaN, following
//! `f64::powf`; evaluation never reports an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    check_scale, derivative_order, Constant, FittedFunction, UnivariateFunction,
    EXPONENT_TOLERANCE,
};
use crate::error::{RobustFitError, Result};
use crate::utils::{falling_factorial, scaled};

/// Coefficient and exponent of `a * x^e` after `n` differentiations.
fn derive_term(a: f64, exponent: f64, n: usize) -> (f64, f64) {
    let coefficient = a * falling_factorial(exponent, n);
    let mut derived = exponent - n as f64;
    if derived.abs() < EXPONENT_TOLERANCE {
        derived = 0.0;
    }
    (coefficient, derived)
}

/// A power function, `f(x) = a * x^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerFunction {
    a: f64,
    exponent: f64,
}

impl PowerFunction {
    pub fn new(a: f64, exponent: f64) -> Self {
        Self { a, exponent }
    }

    /// The coefficient.
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.a * s, self.exponent)
    }

    /// The `order`-th derivative, `a * e*(e-1)*...*(e-n+1) * x^(e-n)`.
    ///
    /// A vanishing coefficient gives the zero constant, and an exponent that
    /// reaches zero gives a [`Constant`].
    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        let n = derivative_order(order)?;
        if n == 0 {
            return Ok((*self).into());
        }

        let (coefficient, exponent) = derive_term(self.a, self.exponent, n);
        if coefficient == 0.0 {
            Ok(FittedFunction::zero())
        } else if exponent == 0.0 {
            Ok(Constant::new(coefficient).into())
        } else {
            Ok(Self::new(coefficient, exponent).into())
        }
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if (power - self.exponent).abs() < EXPONENT_TOLERANCE {
            self.a
        } else {
            0.0
        }
    }

    pub fn parameter_count(&self) -> usize {
        2
    }

    pub fn parameters(&self) -> Vec<f64> {
        vec![self.a, self.exponent]
    }

    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        Ok(Self::new(self.a / h.powf(self.exponent), self.exponent))
    }
}

impl UnivariateFunction for PowerFunction {
    fn value(&self, x: f64) -> f64 {
        self.a * x.powf(self.exponent)
    }
}

/// The sesquilinear function, `f(x) = a * x^1.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sesquilinear {
    a: f64,
}

impl Sesquilinear {
    pub const EXPONENT: f64 = 1.5;

    pub fn new(a: f64) -> Self {
        Self { a }
    }

    /// The coefficient of `x^1.5`.
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.a * s)
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        if derivative_order(order)? == 0 {
            return Ok((*self).into());
        }
        PowerFunction::new(self.a, Self::EXPONENT).derivative(order)
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if (power - Self::EXPONENT).abs() < EXPONENT_TOLERANCE {
            self.a
        } else {
            0.0
        }
    }

    pub fn parameter_count(&self) -> usize {
        1
    }

    pub fn parameters(&self) -> Vec<f64> {
        vec![self.a]
    }

    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        Ok(Self::new(self.a / (h * h.sqrt())))
    }
}

impl UnivariateFunction for Sesquilinear {
    fn value(&self, x: f64) -> f64 {
        self.a * x * x.sqrt()
    }
}

/// Map key for an exponent; `-0.0` and `0.0` share a key.
fn exponent_key(exponent: f64) -> u64 {
    if exponent == 0.0 {
        0.0f64.to_bits()
    } else {
        exponent.to_bits()
    }
}

/// Serialized form of [`PowerFunctionCombination`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerTerms {
    exponents: Vec<f64>,
    factors: Vec<f64>,
}

/// A sum of power terms, `f(x) = sum_i factors[i] * x^exponents[i]`.
///
/// The exponent-to-factor lookup used by [`coefficient`](Self::coefficient)
/// is built once at construction, so instances stay immutable and can be
/// shared between threads. Repeated exponents are summed in the lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PowerTerms", into = "PowerTerms")]
pub struct PowerFunctionCombination {
    exponents: Vec<f64>,
    factors: Vec<f64>,
    coefficients: HashMap<u64, f64>,
}

impl PowerFunctionCombination {
    /// Create a combination from parallel exponent and factor vectors.
    ///
    /// # Arguments
    ///
    /// * `exponents` - The exponent of each term
    /// * `factors` - The factor of each term
    ///
    /// # Returns
    ///
    /// * The combination, or `InvalidArgument` if the vectors differ in length
    pub fn new(exponents: Vec<f64>, factors: Vec<f64>) -> Result<Self> {
        if exponents.len() != factors.len() {
            return Err(RobustFitError::invalid(format!(
                "expected as many factors as exponents, got {} exponents and {} factors",
                exponents.len(),
                factors.len()
            )));
        }

        let mut coefficients = HashMap::with_capacity(exponents.len());
        for (&e, &f) in exponents.iter().zip(factors.iter()) {
            *coefficients.entry(exponent_key(e)).or_insert(0.0) += f;
        }

        Ok(Self {
            exponents,
            factors,
            coefficients,
        })
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    pub fn term_count(&self) -> usize {
        self.exponents.len()
    }

    pub fn multiply(&self, s: f64) -> Self {
        let factors = scaled(&self.factors, s);
        let coefficients = self
            .coefficients
            .iter()
            .map(|(&k, &v)| (k, v * s))
            .collect();
        Self {
            exponents: self.exponents.clone(),
            factors,
            coefficients,
        }
    }

    /// Differentiates every term; terms whose factor vanishes are dropped.
    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        let n = derivative_order(order)?;
        if n == 0 {
            return Ok(self.clone().into());
        }

        let (factors, exponents): (Vec<f64>, Vec<f64>) = self
            .factors
            .iter()
            .zip(self.exponents.iter())
            .map(|(&f, &e)| derive_term(f, e, n))
            .filter(|&(f, _)| f != 0.0)
            .unzip();

        if factors.is_empty() {
            return Ok(FittedFunction::zero());
        }
        Ok(Self::new(exponents, factors)?.into())
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        self.coefficients
            .get(&exponent_key(power))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn parameter_count(&self) -> usize {
        2 * self.exponents.len()
    }

    /// Exponents followed by factors.
    pub fn parameters(&self) -> Vec<f64> {
        let mut parameters = self.exponents.clone();
        parameters.extend_from_slice(&self.factors);
        parameters
    }

    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        let factors = self
            .factors
            .iter()
            .zip(self.exponents.iter())
            .map(|(&f, &e)| f / h.powf(e))
            .collect();
        Self::new(self.exponents.clone(), factors)
    }
}

impl UnivariateFunction for PowerFunctionCombination {
    fn value(&self, x: f64) -> f64 {
        self.factors
            .iter()
            .zip(self.exponents.iter())
            .map(|(&f, &e)| f * x.powf(e))
            .sum()
    }
}

impl TryFrom<PowerTerms> for PowerFunctionCombination {
    type Error = RobustFitError;

    fn try_from(terms: PowerTerms) -> Result<Self> {
        Self::new(terms.exponents, terms.factors)
    }
}

impl From<PowerFunctionCombination> for PowerTerms {
    fn from(combination: PowerFunctionCombination) -> Self {
        Self {
            exponents: combination.exponents,
            factors: combination.factors,
        }
    }
}
