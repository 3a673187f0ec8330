//! # robustfit-rs
//!
//! `robustfit-rs` provides closed-form curve models and robust least-squares
//! criteria for fitting force-distance curves and similar noisy
//! one-dimensional data.
//!
//! The library provides:
//! - A family of univariate models (constants, lines, polynomials, power
//!   functions and their combinations) with symbolic derivatives, scalar
//!   multiples and horizontal rescaling
//! - Trimmed and Windsorized sums of squared residuals, which ignore or cap
//!   the largest residuals so outliers do not dominate a fit
//! - Newton interpolation and separable multivariate models built from the
//!   univariate ones
//!
//! ## Basic Usage
//!
//! ```
//! use robustfit_rs::{Line, PointSet, TrimConfig, TrimmedSquares, UnivariateFunction};
//!
//! let observations = [[0.0, 1.0], [1.0, 3.0], [2.0, 5.0], [3.0, 40.0]];
//! let points = PointSet::pairs(&observations);
//!
//! // keep the three best-fitting points
//! let mut evaluator = TrimmedSquares::new(points, TrimConfig::trimmed(3)).unwrap();
//! let line = Line::new(1.0, 2.0);
//! assert_eq!(evaluator.evaluate(&line).unwrap(), 0.0);
//!
//! // the same criterion with a caller-owned scratch buffer
//! let mut scratch = [0.0; 4];
//! assert_eq!(line.trimmed_squares(&points, &mut scratch, 3).unwrap(), 0.0);
//! ```

// Public modules
pub mod error;
pub mod functions;
pub mod trimmed;
pub mod utils;

// Re-exports for convenience
pub use error::{Result, RobustFitError};

pub use functions::{
    BareQuadratic, Bivariate, BivariateLinear, BivariatePolynomial, Constant, FittedFunction,
    FunctionKind, InterceptlessLine, Line, MultivariateLinear, MultivariatePolynomial,
    NewtonPolynomial, Polynomial, PowerFunction, PowerFunctionCombination, Separable,
    Sesquilinear, ThresholdFunction, UnivariateFunction,
};

pub use trimmed::{Criterion, PointSet, Retention, TrimConfig, TrimmedSquares};

#[cfg(feature = "parallel")]
pub use utils::evaluate_candidates_parallel;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
