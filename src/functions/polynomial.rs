//! Polynomial models.
//!
//! This module provides the polynomial family used for force-curve fitting:
//! constants, lines with and without intercept, the bare quadratic `c*x^2`,
//! and general polynomials with ring algebra (sum, difference, product and
//! division with remainder).

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::{check_scale, derivative_order, FittedFunction, PowerFunction, UnivariateFunction};
use crate::error::{RobustFitError, Result};
use crate::utils::{falling_factorial, int_pow, scaled};

/// A constant function, `f(x) = a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    a: f64,
}

impl Constant {
    pub fn new(a: f64) -> Self {
        Self { a }
    }

    /// The constant value.
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.a * s)
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        Ok(match derivative_order(order)? {
            0 => (*self).into(),
            _ => FittedFunction::zero(),
        })
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if power == 0.0 {
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
        Ok(*self)
    }
}

impl UnivariateFunction for Constant {
    fn value(&self, _x: f64) -> f64 {
        self.a
    }
}

/// A line through the origin, `f(x) = b * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptlessLine {
    b: f64,
}

impl InterceptlessLine {
    pub fn new(b: f64) -> Self {
        Self { b }
    }

    /// The slope.
    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.b * s)
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        Ok(match derivative_order(order)? {
            0 => (*self).into(),
            1 => Constant::new(self.b).into(),
            _ => FittedFunction::zero(),
        })
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if power == 1.0 {
            self.b
        } else {
            0.0
        }
    }

    pub fn parameter_count(&self) -> usize {
        1
    }

    pub fn parameters(&self) -> Vec<f64> {
        vec![self.b]
    }

    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        Ok(Self::new(self.b / h))
    }
}

impl UnivariateFunction for InterceptlessLine {
    fn value(&self, x: f64) -> f64 {
        self.b * x
    }
}

/// A straight line, `f(x) = a + b * x`.
///
/// Where:
/// - a: the intercept
/// - b: the slope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    a: f64,
    b: f64,
}

impl Line {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// The intercept.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// The slope.
    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.a * s, self.b * s)
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        Ok(match derivative_order(order)? {
            0 => (*self).into(),
            1 => Constant::new(self.b).into(),
            _ => FittedFunction::zero(),
        })
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if power == 0.0 {
            self.a
        } else if power == 1.0 {
            self.b
        } else {
            0.0
        }
    }

    pub fn parameter_count(&self) -> usize {
        2
    }

    pub fn parameters(&self) -> Vec<f64> {
        vec![self.a, self.b]
    }

    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        Ok(Self::new(self.a, self.b / h))
    }

    /// Rescales a line fitted in normalized coordinates about `origin`.
    ///
    /// Returns `g` with `g(x) = f((x - origin) / h)`, so the slope becomes
    /// `b / h` and the intercept `a - (b / h) * origin`.
    pub fn h_scaled_about(&self, h: f64, origin: f64) -> Result<Self> {
        check_scale(h)?;
        let slope = self.b / h;
        Ok(Self::new(self.a - slope * origin, slope))
    }

    pub fn plus(&self, other: &Line) -> Self {
        Self::new(self.a + other.a, self.b + other.b)
    }

    pub fn minus(&self, other: &Line) -> Self {
        Self::new(self.a - other.a, self.b - other.b)
    }

    pub fn is_zero(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }
}

impl UnivariateFunction for Line {
    fn value(&self, x: f64) -> f64 {
        self.a + self.b * x
    }
}

/// A pure quadratic without lower-order terms, `f(x) = c * x^2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BareQuadratic {
    c: f64,
}

impl BareQuadratic {
    pub fn new(c: f64) -> Self {
        Self { c }
    }

    /// The coefficient of `x^2`.
    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.c * s)
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        let n = derivative_order(order)?;
        if n > 3 {
            return Ok(FittedFunction::zero());
        }

        Ok(match n {
            0 => (*self).into(),
            1 => InterceptlessLine::new(2.0 * self.c).into(),
            2 => Constant::new(2.0 * self.c).into(),
            // third derivative goes through the general power rule
            _ => PowerFunction::new(self.c, 2.0).derivative(order)?,
        })
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if power == 2.0 {
            self.c
        } else {
            0.0
        }
    }

    pub fn parameter_count(&self) -> usize {
        1
    }

    pub fn parameters(&self) -> Vec<f64> {
        vec![self.c]
    }

    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        Ok(Self::new(self.c / (h * h)))
    }
}

impl UnivariateFunction for BareQuadratic {
    fn value(&self, x: f64) -> f64 {
        self.c * x * x
    }
}

/// A polynomial of arbitrary degree
///
/// The polynomial function is defined as:
///
/// f(x) = c[0] + c[1]*x + c[2]*x^2 + ... + c[n]*x^n
///
/// Where c[i] are the polynomial coefficients in ascending powers. An empty
/// coefficient vector is the zero polynomial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients in ascending powers.
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Nominal degree, `coefficients.len() - 1` (0 for the empty polynomial).
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The coefficients in ascending powers.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree ignoring trailing zero coefficients, `None` for the zero polynomial.
    fn effective_degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|&c| c != 0.0)
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(scaled(&self.coefficients, s))
    }

    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        let n = derivative_order(order)?;
        if n == 0 {
            return Ok(self.clone().into());
        }
        let degree = match self.effective_degree() {
            Some(d) if n <= d => d,
            _ => return Ok(FittedFunction::zero()),
        };

        // trailing zero coefficients do not survive differentiation
        let derived: Vec<f64> = self.coefficients[n..=degree]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * falling_factorial((i + n) as f64, n))
            .collect();

        if derived.len() == 1 {
            Ok(Constant::new(derived[0]).into())
        } else {
            Ok(Self::new(derived).into())
        }
    }

    pub fn coefficient(&self, power: f64) -> f64 {
        if power < 0.0 || power.fract() != 0.0 {
            return 0.0;
        }
        self.coefficients
            .get(power as usize)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn parameter_count(&self) -> usize {
        self.coefficients.len()
    }

    pub fn parameters(&self) -> Vec<f64> {
        self.coefficients.clone()
    }

    /// Returns `g` with `g(x) = f(x / h)`: coefficient `i` is divided by `h^i`.
    pub fn h_scaled(&self, h: f64) -> Result<Self> {
        check_scale(h)?;
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, &c)| c / int_pow(h, i as u32))
            .collect();
        Ok(Self::new(coefficients))
    }

    pub fn is_zero(&self) -> bool {
        self.effective_degree().is_none()
    }

    /// Same as [`Polynomial::multiply`].
    pub fn times_scalar(&self, s: f64) -> Self {
        self.multiply(s)
    }

    /// Polynomial product by convolution of the coefficient vectors.
    pub fn times(&self, other: &Polynomial) -> Self {
        if self.coefficients.is_empty() || other.coefficients.is_empty() {
            return Self::new(Vec::new());
        }

        let mut product = vec![0.0; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] += a * b;
            }
        }
        Self::new(product)
    }

    pub fn plus(&self, other: &Polynomial) -> Self {
        self.zip_padded(other, |a, b| a + b)
    }

    pub fn minus(&self, other: &Polynomial) -> Self {
        self.zip_padded(other, |a, b| a - b)
    }

    fn zip_padded(&self, other: &Polynomial, op: impl Fn(f64, f64) -> f64) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).copied().unwrap_or(0.0);
                let b = other.coefficients.get(i).copied().unwrap_or(0.0);
                op(a, b)
            })
            .collect();
        Self::new(coefficients)
    }

    /// Long division, returning `(quotient, remainder)`.
    ///
    /// The remainder has degree lower than the effective degree of `divisor`.
    /// Dividing by the zero polynomial is an `InvalidArgument`.
    pub fn divide_with_remainder(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        let d = divisor.effective_degree().ok_or_else(|| {
            RobustFitError::invalid("division by the zero polynomial".to_string())
        })?;
        let m = match self.effective_degree() {
            Some(m) if m >= d => m,
            _ => return Ok((Self::new(vec![0.0]), self.clone())),
        };

        let lead = divisor.coefficients[d];
        let mut remainder = self.coefficients[..=m].to_vec();
        let mut quotient = vec![0.0; m - d + 1];

        for k in (0..=m - d).rev() {
            let q = remainder[k + d] / lead;
            quotient[k] = q;
            for (j, &c) in divisor.coefficients[..=d].iter().enumerate() {
                remainder[k + j] -= q * c;
            }
        }

        remainder.truncate(d.max(1));
        if d == 0 {
            remainder[0] = 0.0;
        }

        Ok((Self::new(quotient), Self::new(remainder)))
    }
}

impl UnivariateFunction for Polynomial {
    /// Horner evaluation from the highest power down.
    fn value(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        self.plus(rhs)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self.minus(rhs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        self.times(rhs)
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: f64) -> Polynomial {
        self.times_scalar(rhs)
    }
}
