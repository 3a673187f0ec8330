//! Newton-form interpolating polynomials.
//!
//! The divided-difference table is computed in place over a copy of the
//! sample values, then the polynomial is evaluated by nested multiplication
//! around the interpolation centers:
//!
//! p(x) = c[0] + (x - x[0]) * (c[1] + (x - x[1]) * (c[2] + ...))

use serde::Serialize;

use super::{Polynomial, UnivariateFunction};
use crate::error::{RobustFitError, Result};

/// Polynomial interpolating `n + 1` samples, stored in Newton form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewtonPolynomial {
    centers: Vec<f64>,
    coefficients: Vec<f64>,
}

impl NewtonPolynomial {
    /// Builds the interpolant through `(xs[i], ys[i])`.
    ///
    /// # Arguments
    ///
    /// * `xs` - Sample positions, pairwise distinct
    /// * `ys` - Sample values
    ///
    /// # Returns
    ///
    /// * The interpolant, or `InvalidArgument` for empty or mismatched input
    ///   and for repeated sample positions
    pub fn interpolate(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(RobustFitError::invalid(format!(
                "expected as many values as positions, got {} positions and {} values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(RobustFitError::invalid(
                "interpolation needs at least one sample",
            ));
        }

        let n = xs.len();
        let mut coefficients = ys.to_vec();
        for j in 1..n {
            for i in (j..n).rev() {
                let dx = xs[i] - xs[i - j];
                if dx == 0.0 {
                    return Err(RobustFitError::invalid(format!(
                        "repeated sample position {}",
                        xs[i]
                    )));
                }
                coefficients[i] = (coefficients[i] - coefficients[i - 1]) / dx;
            }
        }

        Ok(Self {
            centers: xs.to_vec(),
            coefficients,
        })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Interpolation centers (the sample positions).
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// Divided differences `f[x0], f[x0, x1], ...`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Expands the Newton form into monomial coefficients.
    pub fn to_polynomial(&self) -> Polynomial {
        let last = self.coefficients.len() - 1;
        let mut result = Polynomial::new(vec![self.coefficients[last]]);
        for i in (0..last).rev() {
            let factor = Polynomial::new(vec![-self.centers[i], 1.0]);
            result = result
                .times(&factor)
                .plus(&Polynomial::new(vec![self.coefficients[i]]));
        }
        result
    }
}

impl UnivariateFunction for NewtonPolynomial {
    fn value(&self, x: f64) -> f64 {
        let last = self.coefficients.len() - 1;
        (0..last).rev().fold(self.coefficients[last], |acc, i| {
            acc * (x - self.centers[i]) + self.coefficients[i]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reproduces_samples() {
        let xs = [0.0, 1.0, 2.5, 4.0];
        let ys = [1.0, -2.0, 0.5, 3.0];
        let p = NewtonPolynomial::interpolate(&xs, &ys).unwrap();

        assert_eq!(p.degree(), 3);
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(p.value(x), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exact_for_polynomials() {
        let truth = Polynomial::new(vec![2.0, -1.0, 0.5]);
        let xs = [-1.0, 0.5, 3.0];
        let ys: Vec<f64> = xs.iter().map(|&x| truth.value(x)).collect();
        let p = NewtonPolynomial::interpolate(&xs, &ys).unwrap();

        for &x in &[-3.0, 0.0, 1.7, 10.0] {
            assert_relative_eq!(p.value(x), truth.value(x), epsilon = 1e-9);
        }

        let expanded = p.to_polynomial();
        for (a, b) in expanded.coefficients().iter().zip(truth.coefficients()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_single_sample_is_constant() {
        let p = NewtonPolynomial::interpolate(&[3.0], &[7.0]).unwrap();
        assert_eq!(p.degree(), 0);
        assert_eq!(p.value(-100.0), 7.0);
        assert_eq!(p.to_polynomial().coefficients(), &[7.0]);
    }

    #[test]
    fn test_invalid_input() {
        assert!(NewtonPolynomial::interpolate(&[], &[]).is_err());
        assert!(NewtonPolynomial::interpolate(&[1.0, 2.0], &[1.0]).is_err());
        assert!(matches!(
            NewtonPolynomial::interpolate(&[1.0, 1.0], &[1.0, 2.0]),
            Err(RobustFitError::InvalidArgument(_))
        ));
    }
}
