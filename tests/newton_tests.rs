//! Integration tests for Newton interpolation.

use approx::assert_relative_eq;
use robustfit_rs::{NewtonPolynomial, Polynomial, RobustFitError, UnivariateFunction};

use crate::test_helpers::{random_values, seeded_rng};

#[test]
fn test_interpolates_random_samples() {
    let mut rng = seeded_rng(17);
    let xs: Vec<f64> = (0..6).map(|i| i as f64 * 0.75 - 2.0).collect();
    let ys = random_values(&mut rng, xs.len(), -3.0, 3.0);

    let p = NewtonPolynomial::interpolate(&xs, &ys).unwrap();
    let expanded = p.to_polynomial();
    assert_eq!(expanded.degree(), 5);

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        assert_relative_eq!(p.value(x), y, epsilon = 1e-9);
        assert_relative_eq!(expanded.value(x), y, epsilon = 1e-8);
    }
}

#[test]
fn test_recovers_quadratic() {
    let truth = Polynomial::new(vec![1.0, -2.0, 3.0]);
    let xs = [0.0, 1.0, 2.0, 5.0];
    let ys: Vec<f64> = xs.iter().map(|&x| truth.value(x)).collect();

    let p = NewtonPolynomial::interpolate(&xs, &ys).unwrap();
    // the cubic divided difference vanishes
    assert_relative_eq!(p.coefficients()[3], 0.0, epsilon = 1e-12);
    assert_eq!(p.centers(), &xs);
}

#[test]
fn test_rejects_bad_samples() {
    assert!(matches!(
        NewtonPolynomial::interpolate(&[], &[]),
        Err(RobustFitError::InvalidArgument(_))
    ));
    assert!(NewtonPolynomial::interpolate(&[0.0, 1.0], &[1.0]).is_err());
    assert!(NewtonPolynomial::interpolate(&[0.0, 1.0, 0.0], &[1.0, 2.0, 3.0]).is_err());
}
