//! Additively separable surfaces.
//!
//! These model planar or polynomial backgrounds of topography images: one
//! univariate component per axis, summed. They support scaling, addition and
//! subtraction instead of derivatives.

use serde::{Deserialize, Serialize};

use super::{Line, Polynomial, UnivariateFunction};
use crate::error::{RobustFitError, Result};

/// A univariate function usable as one axis of a separable surface.
pub trait SeparableComponent: UnivariateFunction + Clone {
    fn plus(&self, other: &Self) -> Self;

    fn minus(&self, other: &Self) -> Self;

    fn scaled(&self, factor: f64) -> Self;

    fn is_zero(&self) -> bool;

    fn component_parameters(&self) -> Vec<f64>;
}

impl SeparableComponent for Line {
    fn plus(&self, other: &Self) -> Self {
        Line::plus(self, other)
    }

    fn minus(&self, other: &Self) -> Self {
        Line::minus(self, other)
    }

    fn scaled(&self, factor: f64) -> Self {
        self.multiply(factor)
    }

    fn is_zero(&self) -> bool {
        Line::is_zero(self)
    }

    fn component_parameters(&self) -> Vec<f64> {
        self.parameters()
    }
}

impl SeparableComponent for Polynomial {
    fn plus(&self, other: &Self) -> Self {
        Polynomial::plus(self, other)
    }

    fn minus(&self, other: &Self) -> Self {
        Polynomial::minus(self, other)
    }

    fn scaled(&self, factor: f64) -> Self {
        self.multiply(factor)
    }

    fn is_zero(&self) -> bool {
        Polynomial::is_zero(self)
    }

    fn component_parameters(&self) -> Vec<f64> {
        self.parameters()
    }
}

/// `f(x, y) = fx(x) + fy(y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bivariate<F> {
    x: F,
    y: F,
}

/// Plane `ax + bx*x + ay + by*y`.
pub type BivariateLinear = Bivariate<Line>;

/// Sum of one polynomial in `x` and one in `y`.
pub type BivariatePolynomial = Bivariate<Polynomial>;

impl<F: SeparableComponent> Bivariate<F> {
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    pub fn x_component(&self) -> &F {
        &self.x
    }

    pub fn y_component(&self) -> &F {
        &self.y
    }

    pub fn value(&self, x: f64, y: f64) -> f64 {
        self.x.value(x) + self.y.value(y)
    }

    /// `z - f(x, y)`.
    pub fn residual(&self, x: f64, y: f64, z: f64) -> f64 {
        z - self.value(x, y)
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.x.scaled(s), self.y.scaled(s))
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x.plus(&other.x), self.y.plus(&other.y))
    }

    pub fn subtract(&self, other: &Self) -> Self {
        Self::new(self.x.minus(&other.x), self.y.minus(&other.y))
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    /// Parameters of the x component followed by those of the y component.
    pub fn parameters(&self) -> Vec<f64> {
        let mut parameters = self.x.component_parameters();
        parameters.extend(self.y.component_parameters());
        parameters
    }
}

/// `f(p) = sum_i components[i](p[i])` over `N` axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Separable<F> {
    components: Vec<F>,
}

pub type MultivariateLinear = Separable<Line>;

pub type MultivariatePolynomial = Separable<Polynomial>;

impl<F: SeparableComponent> Separable<F> {
    pub fn new(components: Vec<F>) -> Self {
        Self { components }
    }

    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[F] {
        &self.components
    }

    fn check_dimension(&self, found: usize) -> Result<()> {
        if found != self.components.len() {
            return Err(RobustFitError::invalid(format!(
                "expected {} coordinates, got {}",
                self.components.len(),
                found
            )));
        }
        Ok(())
    }

    pub fn value(&self, point: &[f64]) -> Result<f64> {
        self.check_dimension(point.len())?;
        Ok(self
            .components
            .iter()
            .zip(point.iter())
            .map(|(f, &p)| f.value(p))
            .sum())
    }

    /// `z - f(point)`.
    pub fn residual(&self, point: &[f64], z: f64) -> Result<f64> {
        Ok(z - self.value(point)?)
    }

    pub fn multiply(&self, s: f64) -> Self {
        Self::new(self.components.iter().map(|f| f.scaled(s)).collect())
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_dimension(other.dimension())?;
        Ok(Self::new(
            self.components
                .iter()
                .zip(other.components.iter())
                .map(|(a, b)| a.plus(b))
                .collect(),
        ))
    }

    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.check_dimension(other.dimension())?;
        Ok(Self::new(
            self.components
                .iter()
                .zip(other.components.iter())
                .map(|(a, b)| a.minus(b))
                .collect(),
        ))
    }

    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|f| f.is_zero())
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    pub fn parameters(&self) -> Vec<f64> {
        self.components
            .iter()
            .flat_map(|f| f.component_parameters())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bivariate_linear_plane() {
        let plane = BivariateLinear::new(Line::new(1.0, 2.0), Line::new(0.5, -1.0));
        assert_relative_eq!(plane.value(2.0, 3.0), 1.0 + 4.0 + 0.5 - 3.0);
        assert_relative_eq!(plane.residual(2.0, 3.0, 10.0), 10.0 - 2.5);
        assert_eq!(plane.parameters(), vec![1.0, 2.0, 0.5, -1.0]);
        assert_eq!(plane.parameter_count(), 4);
    }

    #[test]
    fn test_bivariate_algebra() {
        let p = BivariatePolynomial::new(
            Polynomial::new(vec![1.0, 0.0, 2.0]),
            Polynomial::new(vec![0.0, 3.0]),
        );
        let q = p.multiply(2.0);
        assert_relative_eq!(q.value(1.0, 1.0), 2.0 * p.value(1.0, 1.0));

        let sum = p.add(&q);
        assert_relative_eq!(sum.value(0.5, -2.0), 3.0 * p.value(0.5, -2.0));

        assert!(p.subtract(&p).is_zero());
        assert!(!p.is_zero());
    }

    #[test]
    fn test_multivariate_value_and_dimension() {
        let f = MultivariateLinear::new(vec![
            Line::new(1.0, 1.0),
            Line::new(0.0, 2.0),
            Line::new(-1.0, 0.5),
        ]);
        assert_eq!(f.dimension(), 3);
        assert_relative_eq!(f.value(&[1.0, 2.0, 4.0]).unwrap(), 2.0 + 4.0 + 1.0);
        assert_relative_eq!(f.residual(&[0.0, 0.0, 0.0], 1.0).unwrap(), 1.0);

        assert!(matches!(
            f.value(&[1.0, 2.0]),
            Err(RobustFitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_multivariate_algebra() {
        let f = MultivariatePolynomial::new(vec![
            Polynomial::new(vec![1.0, 2.0]),
            Polynomial::new(vec![0.0, 0.0, 1.0]),
        ]);
        let g = f.multiply(-1.0);

        assert!(f.add(&g).unwrap().is_zero());
        assert_relative_eq!(
            f.subtract(&g).unwrap().value(&[1.0, 2.0]).unwrap(),
            2.0 * f.value(&[1.0, 2.0]).unwrap()
        );
        assert_eq!(f.parameter_count(), 5);

        let short = MultivariatePolynomial::new(vec![Polynomial::new(vec![1.0])]);
        assert!(f.add(&short).is_err());
    }
}
