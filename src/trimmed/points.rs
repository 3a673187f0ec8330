//! Borrowed point sets for the fit criteria.

use ndarray::ArrayView2;

use crate::error::{RobustFitError, Result};

#[derive(Debug, Clone, Copy)]
enum Storage<'a> {
    Pairs(&'a [[f64; 2]]),
    Array(ArrayView2<'a, f64>),
    Dense(&'a [f64]),
}

/// An ordered sequence of `(x, y)` observations.
///
/// Three layouts are accepted without copying: explicit pairs, an `n x 2`
/// array view, and a dense series of y values whose x coordinates are the
/// indices `0..n`.
#[derive(Debug, Clone, Copy)]
pub struct PointSet<'a> {
    storage: Storage<'a>,
}

impl<'a> PointSet<'a> {
    /// Points given as `[x, y]` pairs.
    pub fn pairs(points: &'a [[f64; 2]]) -> Self {
        Self {
            storage: Storage::Pairs(points),
        }
    }

    /// Dense y values sampled at `x = 0, 1, ..., n - 1`.
    pub fn dense(y: &'a [f64]) -> Self {
        Self {
            storage: Storage::Dense(y),
        }
    }

    /// Points stored as the rows of an `n x 2` array.
    ///
    /// # Returns
    ///
    /// * The point set, or `InvalidArgument` if the array does not have two columns
    pub fn from_array(points: ArrayView2<'a, f64>) -> Result<Self> {
        if points.ncols() != 2 {
            return Err(RobustFitError::invalid(format!(
                "expected an n x 2 array of points, got shape {:?}",
                points.shape()
            )));
        }
        Ok(Self {
            storage: Storage::Array(points),
        })
    }

    /// A set with no points, for calls without support points.
    pub fn empty() -> Self {
        Self::pairs(&[])
    }

    pub fn len(&self) -> usize {
        match self.storage {
            Storage::Pairs(p) => p.len(),
            Storage::Array(a) => a.nrows(),
            Storage::Dense(y) => y.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th point as `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn point(&self, i: usize) -> (f64, f64) {
        match self.storage {
            Storage::Pairs(p) => (p[i][0], p[i][1]),
            Storage::Array(a) => (a[[i, 0]], a[[i, 1]]),
            Storage::Dense(y) => (i as f64, y[i]),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        let this = *self;
        (0..this.len()).map(move |i| this.point(i))
    }
}

impl<'a> From<&'a [[f64; 2]]> for PointSet<'a> {
    fn from(points: &'a [[f64; 2]]) -> Self {
        Self::pairs(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_layouts_agree() {
        let pairs = [[0.0, 1.0], [1.0, 4.0], [2.0, 9.0]];
        let array = array![[0.0, 1.0], [1.0, 4.0], [2.0, 9.0]];
        let dense = [1.0, 4.0, 9.0];

        let a = PointSet::pairs(&pairs);
        let b = PointSet::from_array(array.view()).unwrap();
        let c = PointSet::dense(&dense);

        assert_eq!(a.len(), 3);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
        assert_eq!(a.iter().collect::<Vec<_>>(), c.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_iterator_outlives_the_view() {
        let pairs = [[0.0, 2.0], [1.0, 3.0]];
        let iter = {
            let view = PointSet::pairs(&pairs);
            view.iter()
        };
        assert_eq!(iter.collect::<Vec<_>>(), vec![(0.0, 2.0), (1.0, 3.0)]);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let array = array![[0.0, 1.0, 2.0]];
        assert!(PointSet::from_array(array.view()).is_err());
        assert!(PointSet::empty().is_empty());
    }
}
