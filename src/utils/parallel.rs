//! Parallel evaluation of fit criteria and function grids.
//!
//! Search routines often score a whole population of candidate functions
//! against the same point set. [`evaluate_candidates_parallel`] spreads the
//! candidates over the rayon thread pool, with one scratch buffer per worker
//! so no two evaluations share mutable state.

use log::{debug, warn};
use ndarray::Array1;
use rayon::prelude::*;

use crate::error::Result;
use crate::functions::UnivariateFunction;
use crate::trimmed::{criterion_value, PointSet, TrimConfig};

/// Compute the configured criterion for every candidate in parallel.
///
/// # Arguments
///
/// * `candidates` - The functions to score
/// * `points` - The observations shared by all candidates
/// * `support` - Optional points that are never trimmed
/// * `config` - Retention and criterion
///
/// # Returns
///
/// * One criterion value per candidate, in input order
pub fn evaluate_candidates_parallel<F>(
    candidates: &[F],
    points: &PointSet<'_>,
    support: Option<&PointSet<'_>>,
    config: &TrimConfig,
) -> Result<Vec<f64>>
where
    F: UnivariateFunction + Sync,
{
    let n = points.len();
    let c = config.retention.resolve(n)?;
    let criterion = config.criterion;

    debug!(
        "Scoring {} candidates with {} over {} points (c = {})",
        candidates.len(),
        criterion,
        n,
        c
    );

    let scores: Vec<f64> = candidates
        .par_iter()
        .map_init(
            || vec![0.0; n],
            |scratch, f| criterion_value(f, points, support, scratch, c, criterion),
        )
        .collect::<Result<Vec<_>>>()?;

    for (i, score) in scores.iter().enumerate() {
        if !score.is_finite() {
            warn!("Candidate {} has a non-finite criterion ({})", i, score);
        }
    }

    Ok(scores)
}

/// Evaluate `f` at every grid point in parallel.
pub fn values_parallel<F>(f: &F, grid: &Array1<f64>) -> Array1<f64>
where
    F: UnivariateFunction + Sync + ?Sized,
{
    let values: Vec<f64> = match grid.as_slice() {
        Some(slice) => slice.par_iter().map(|&x| f.value(x)).collect(),
        None => grid.iter().map(|&x| f.value(x)).collect(),
    };
    Array1::from_vec(values)
}
