//! Configuration options for trimmed fit criteria.
//!
//! This module defines how many of the smallest squared residuals a criterion
//! keeps and whether the discarded ones are charged a Windsorized penalty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RobustFitError, Result};

/// How many of the smallest squared residuals are retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Retention {
    /// Keep every point (ordinary least squares)
    All,

    /// Keep exactly this many points
    Count(usize),

    /// Keep `ceil(fraction * n)` points, `0 < fraction <= 1`
    Fraction(f64),
}

impl Default for Retention {
    fn default() -> Self {
        Retention::All
    }
}

impl Retention {
    /// Resolve the retained count `c` for a point set of size `n`.
    ///
    /// # Returns
    ///
    /// * `c` with `1 <= c <= n`, or `InvalidArgument` if no such `c` exists
    ///   or the retention itself is out of range
    pub fn resolve(&self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(RobustFitError::invalid(
                "cannot retain points from an empty point set",
            ));
        }

        match *self {
            Retention::All => Ok(n),
            Retention::Count(c) if (1..=n).contains(&c) => Ok(c),
            Retention::Count(c) => Err(RobustFitError::invalid(format!(
                "retained count {} must lie in [1, {}]",
                c, n
            ))),
            Retention::Fraction(f) if f > 0.0 && f <= 1.0 => {
                Ok(((f * n as f64).ceil() as usize).clamp(1, n))
            }
            Retention::Fraction(f) => Err(RobustFitError::invalid(format!(
                "retained fraction {} must lie in (0, 1]",
                f
            ))),
        }
    }
}

/// Which trimmed criterion to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Sum of the `c` smallest squared residuals
    Plain,

    /// Plain sum plus `(n - c)` times the `c`-th smallest squared residual
    Windsorized,
}

impl Default for Criterion {
    fn default() -> Self {
        Criterion::Plain
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Plain => write!(f, "Trimmed squares"),
            Criterion::Windsorized => write!(f, "Windsorized trimmed squares"),
        }
    }
}

/// Configuration for a trimmed fit criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimConfig {
    /// Number of retained residuals. Default: all
    pub retention: Retention,

    /// Plain or Windsorized. Default: plain
    pub criterion: Criterion,
}

impl TrimConfig {
    /// Plain trimmed squares keeping `c` points.
    pub fn trimmed(c: usize) -> Self {
        Self {
            retention: Retention::Count(c),
            criterion: Criterion::Plain,
        }
    }

    /// Windsorized trimmed squares keeping `c` points.
    pub fn windsorized(c: usize) -> Self {
        Self {
            retention: Retention::Count(c),
            criterion: Criterion::Windsorized,
        }
    }

    /// Plain trimmed squares keeping a fraction of the points.
    pub fn fraction(fraction: f64) -> Self {
        Self {
            retention: Retention::Fraction(fraction),
            criterion: Criterion::Plain,
        }
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }
}
