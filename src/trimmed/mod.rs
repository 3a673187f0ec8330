//! Robust fit criteria based on order statistics.
//!
//! This module computes trimmed and Windsorized sums of squared residuals of
//! a candidate function over a point set. The criteria discount the largest
//! residuals (adhesion spikes, noise bursts) so that a search over model
//! parameters is not dragged towards outliers.
//!
//! The free functions in [`engine`] take a caller-owned scratch buffer and
//! never allocate. [`TrimmedSquares`] bundles a point set with its own buffer
//! for optimization loops that evaluate many candidates against the same data.

pub mod config;
pub mod engine;
pub mod evaluator;
pub mod points;

// Re-export key types
pub use config::{Criterion, Retention, TrimConfig};
pub use engine::{
    criterion_value, least_squares, trimmed_squares, trimmed_squares_with_support,
    trimmed_w_squares, trimmed_w_squares_with_support,
};
pub use evaluator::TrimmedSquares;
pub use points::PointSet;
