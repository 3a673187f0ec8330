//! Reusable criterion evaluator for optimization loops.

use log::debug;

use super::engine::criterion_value;
use super::{Criterion, PointSet, TrimConfig};
use crate::error::Result;
use crate::functions::UnivariateFunction;

/// A point set bound to its own scratch buffer and resolved retained count.
///
/// Binding the points and the scratch together makes their lengths a single
/// invariant: the buffer is allocated once in [`TrimmedSquares::new`] and
/// every later [`evaluate`](TrimmedSquares::evaluate) call reuses it.
///
/// Each evaluator must be used by one thread at a time; give every worker its
/// own evaluator.
#[derive(Debug, Clone)]
pub struct TrimmedSquares<'a> {
    points: PointSet<'a>,
    support: Option<PointSet<'a>>,
    criterion: Criterion,
    retained: usize,
    scratch: Vec<f64>,
}

impl<'a> TrimmedSquares<'a> {
    /// Create an evaluator for `points` with the given configuration.
    ///
    /// # Returns
    ///
    /// * The evaluator, or `InvalidArgument` if the retention cannot be
    ///   resolved for this many points
    pub fn new(points: PointSet<'a>, config: TrimConfig) -> Result<Self> {
        let n = points.len();
        let retained = config.retention.resolve(n)?;

        debug!(
            "{} over {} points, retaining {}",
            config.criterion, n, retained
        );

        Ok(Self {
            points,
            support: None,
            criterion: config.criterion,
            retained,
            scratch: vec![0.0; n],
        })
    }

    /// Adds points that always contribute their full squared residual.
    pub fn with_support(mut self, support: PointSet<'a>) -> Self {
        self.support = Some(support);
        self
    }

    /// The criterion of `f` over the bound points.
    pub fn evaluate<F: UnivariateFunction + ?Sized>(&mut self, f: &F) -> Result<f64> {
        criterion_value(
            f,
            &self.points,
            self.support.as_ref(),
            &mut self.scratch,
            self.retained,
            self.criterion,
        )
    }

    /// Number of points `n`.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The resolved retained count `c`.
    pub fn retained(&self) -> usize {
        self.retained
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Squared residuals left by the last evaluation, smallest `c` first.
    pub fn squared_residuals(&self) -> &[f64] {
        &self.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{Constant, Line};
    use crate::trimmed::Retention;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluator_matches_free_functions() {
        let pairs = [[0.0, 1.0], [1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [4.0, 5.0]];
        let points = PointSet::pairs(&pairs);

        let mut plain = TrimmedSquares::new(points, TrimConfig::trimmed(3)).unwrap();
        let mut windsorized = TrimmedSquares::new(points, TrimConfig::windsorized(3)).unwrap();

        assert_eq!(plain.len(), 5);
        assert_eq!(plain.retained(), 3);
        assert_relative_eq!(plain.evaluate(&Constant::new(0.0)).unwrap(), 14.0);
        assert_relative_eq!(windsorized.evaluate(&Constant::new(0.0)).unwrap(), 32.0);

        let threshold = plain.squared_residuals()[..3]
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(threshold, 9.0);
    }

    #[test]
    fn test_evaluator_reuse_and_support() {
        let y = [0.0, 1.0, 2.0, 30.0];
        let support_pairs = [[10.0, 12.0]];
        let mut evaluator = TrimmedSquares::new(
            PointSet::dense(&y),
            TrimConfig::default().with_retention(Retention::Fraction(0.75)),
        )
        .unwrap()
        .with_support(PointSet::pairs(&support_pairs));

        // the outlier at x = 3 is trimmed, the support point is not
        assert_relative_eq!(evaluator.evaluate(&Line::new(0.0, 1.0)).unwrap(), 4.0);
        assert_relative_eq!(
            evaluator.evaluate(&Line::new(0.0, 1.2)).unwrap(),
            0.04 + 0.16,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_evaluator_rejects_empty_points() {
        assert!(TrimmedSquares::new(PointSet::empty(), TrimConfig::default()).is_err());
    }
}
