//! Trimmed and Windsorized sums of squared residuals.
//!
//! All criteria follow the same steps:
//!
//! 1. write the squared residual of every point into a caller-owned scratch
//!    buffer of the same length as the point set,
//! 2. move the `c` smallest squares to the front of the buffer,
//! 3. sum them.
//!
//! The Windsorized variant additionally charges each of the `n - c` discarded
//! points the `c`-th smallest square, and the `_with_support` variants add the
//! full squared residual of every support point. Nothing here allocates, so
//! the functions can sit inside an optimizer's inner loop.

use super::{Criterion, PointSet};
use crate::error::{RobustFitError, Result};
use crate::functions::UnivariateFunction;
use crate::utils::partial_sort_smallest;

/// Ordinary (untrimmed) sum of squared residuals.
pub fn least_squares<F: UnivariateFunction + ?Sized>(f: &F, points: &PointSet<'_>) -> f64 {
    points
        .iter()
        .map(|(x, y)| {
            let r = f.residual(x, y);
            r * r
        })
        .sum()
}

fn check_inputs(points: &PointSet<'_>, scratch: &[f64], c: usize) -> Result<()> {
    let n = points.len();
    if scratch.len() != n {
        return Err(RobustFitError::invalid(format!(
            "scratch buffer holds {} values but there are {} points",
            scratch.len(),
            n
        )));
    }
    if c == 0 || c > n {
        return Err(RobustFitError::invalid(format!(
            "retained count {} must lie in [1, {}]",
            c, n
        )));
    }
    Ok(())
}

/// Fills `scratch` with squared residuals, last point first.
fn fill_squared_residuals<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    scratch: &mut [f64],
) {
    for i in (0..scratch.len()).rev() {
        let (x, y) = points.point(i);
        let r = f.residual(x, y);
        scratch[i] = r * r;
    }
}

/// Sum of the `c` smallest squares; leaves `scratch[c - 1]` at the threshold.
fn smallest_sum<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    scratch: &mut [f64],
    c: usize,
) -> Result<f64> {
    check_inputs(points, scratch, c)?;
    fill_squared_residuals(f, points, scratch);
    partial_sort_smallest(scratch, c)?;
    Ok(scratch[..c].iter().sum())
}

fn windsorized_penalty(scratch: &[f64], c: usize) -> f64 {
    let remnants = scratch.len() - c;
    remnants as f64 * scratch[c - 1]
}

/// Sum of the `c` smallest squared residuals of `f` over `points`.
///
/// # Arguments
///
/// * `f` - The candidate function
/// * `points` - The observations, `n` of them
/// * `scratch` - Buffer of length `n`, fully overwritten
/// * `c` - Number of retained residuals, `1 <= c <= n`
///
/// # Returns
///
/// * The criterion (lower is better), or `InvalidArgument` when the scratch
///   length differs from `n` or `c` is out of range
pub fn trimmed_squares<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    scratch: &mut [f64],
    c: usize,
) -> Result<f64> {
    smallest_sum(f, points, scratch, c)
}

/// [`trimmed_squares`] plus the untrimmed squared residuals of `support`.
pub fn trimmed_squares_with_support<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    support: &PointSet<'_>,
    scratch: &mut [f64],
    c: usize,
) -> Result<f64> {
    Ok(smallest_sum(f, points, scratch, c)? + least_squares(f, support))
}

/// Windsorized trimmed sum of squares.
///
/// The sum of the `c` smallest squared residuals plus `(n - c)` times the
/// `c`-th smallest one, so every discarded point is charged the trimming
/// threshold instead of being ignored.
pub fn trimmed_w_squares<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    scratch: &mut [f64],
    c: usize,
) -> Result<f64> {
    let sum = smallest_sum(f, points, scratch, c)?;
    Ok(sum + windsorized_penalty(scratch, c))
}

/// [`trimmed_w_squares`] plus the untrimmed squared residuals of `support`.
pub fn trimmed_w_squares_with_support<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    support: &PointSet<'_>,
    scratch: &mut [f64],
    c: usize,
) -> Result<f64> {
    let sum = smallest_sum(f, points, scratch, c)?;
    Ok(sum + windsorized_penalty(scratch, c) + least_squares(f, support))
}

/// Computes the selected criterion, with or without support points.
pub fn criterion_value<F: UnivariateFunction + ?Sized>(
    f: &F,
    points: &PointSet<'_>,
    support: Option<&PointSet<'_>>,
    scratch: &mut [f64],
    c: usize,
    criterion: Criterion,
) -> Result<f64> {
    match (criterion, support) {
        (Criterion::Plain, None) => trimmed_squares(f, points, scratch, c),
        (Criterion::Plain, Some(s)) => trimmed_squares_with_support(f, points, s, scratch, c),
        (Criterion::Windsorized, None) => trimmed_w_squares(f, points, scratch, c),
        (Criterion::Windsorized, Some(s)) => {
            trimmed_w_squares_with_support(f, points, s, scratch, c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{Constant, Line};
    use approx::assert_relative_eq;

    /// Squared residuals against `Constant(0)` are 1, 4, 9, 16, 25.
    fn square_ladder() -> [[f64; 2]; 5] {
        [[0.0, 1.0], [1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [4.0, 5.0]]
    }

    #[test]
    fn test_trimmed_squares() {
        let pairs = square_ladder();
        let points = PointSet::pairs(&pairs);
        let mut scratch = [0.0; 5];
        let f = Constant::new(0.0);

        assert_relative_eq!(trimmed_squares(&f, &points, &mut scratch, 3).unwrap(), 14.0);
        assert_relative_eq!(trimmed_squares(&f, &points, &mut scratch, 1).unwrap(), 1.0);
        assert_relative_eq!(trimmed_squares(&f, &points, &mut scratch, 5).unwrap(), 55.0);
    }

    #[test]
    fn test_windsorized_squares() {
        let pairs = square_ladder();
        let points = PointSet::pairs(&pairs);
        let mut scratch = [0.0; 5];
        let f = Constant::new(0.0);

        // 1 + 4 + 9 plus two remnants charged 9 each
        assert_relative_eq!(trimmed_w_squares(&f, &points, &mut scratch, 3).unwrap(), 32.0);
        // nothing trimmed, nothing charged
        assert_relative_eq!(trimmed_w_squares(&f, &points, &mut scratch, 5).unwrap(), 55.0);
    }

    #[test]
    fn test_support_points_are_never_trimmed() {
        let pairs = square_ladder();
        let points = PointSet::pairs(&pairs);
        let support_pairs = [[10.0, 10.0]];
        let support = PointSet::pairs(&support_pairs);
        let mut scratch = [0.0; 5];
        let f = Constant::new(0.0);

        assert_relative_eq!(
            trimmed_squares_with_support(&f, &points, &support, &mut scratch, 3).unwrap(),
            14.0 + 100.0
        );
        assert_relative_eq!(
            trimmed_w_squares_with_support(&f, &points, &support, &mut scratch, 3).unwrap(),
            32.0 + 100.0
        );
    }

    #[test]
    fn test_scratch_is_fully_overwritten() {
        let pairs = square_ladder();
        let points = PointSet::pairs(&pairs);
        let mut scratch = [f64::NAN; 5];

        trimmed_squares(&Constant::new(0.0), &points, &mut scratch, 5).unwrap();

        let mut values = scratch.to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, vec![1.0, 4.0, 9.0, 16.0, 25.0]);
    }

    #[test]
    fn test_dense_points_use_index_as_x() {
        let y = [1.0, 3.0, 5.0, 100.0];
        let points = PointSet::dense(&y);
        let mut scratch = [0.0; 4];
        let line = Line::new(1.0, 2.0);

        assert_relative_eq!(trimmed_squares(&line, &points, &mut scratch, 3).unwrap(), 0.0);
        assert_relative_eq!(least_squares(&line, &points), 93.0 * 93.0);
    }

    #[test]
    fn test_contract_violations() {
        let pairs = square_ladder();
        let points = PointSet::pairs(&pairs);
        let f = Constant::new(0.0);

        let mut short = [0.0; 4];
        assert!(matches!(
            trimmed_squares(&f, &points, &mut short, 2),
            Err(RobustFitError::InvalidArgument(_))
        ));

        let mut scratch = [0.0; 5];
        assert!(trimmed_squares(&f, &points, &mut scratch, 0).is_err());
        assert!(trimmed_w_squares(&f, &points, &mut scratch, 6).is_err());
    }

    #[test]
    fn test_criterion_dispatch() {
        let pairs = square_ladder();
        let points = PointSet::pairs(&pairs);
        let mut scratch = [0.0; 5];
        let f = Constant::new(0.0);

        let plain = criterion_value(&f, &points, None, &mut scratch, 3, Criterion::Plain).unwrap();
        let windsorized =
            criterion_value(&f, &points, None, &mut scratch, 3, Criterion::Windsorized).unwrap();
        assert_relative_eq!(plain, 14.0);
        assert_relative_eq!(windsorized, 32.0);
    }
}
