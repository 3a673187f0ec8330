//! Closed-form curve and surface models.
//!
//! Every model here is an immutable value: scaling, differentiating or
//! rescaling a function always produces a new, independently owned instance.
//! Univariate models share the [`UnivariateFunction`] capability, which is all
//! the trimmed-squares engine needs, and are gathered in the closed
//! [`FittedFunction`] sum type so callers can hold any of them behind one
//! type and serialize them as a kind tag plus parameters.

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{RobustFitError, Result};
use crate::trimmed::{self, PointSet};

mod multivariate;
mod newton;
mod polynomial;
mod power;
mod threshold;

pub use multivariate::{
    Bivariate, BivariateLinear, BivariatePolynomial, MultivariateLinear, MultivariatePolynomial,
    Separable, SeparableComponent,
};
pub use newton::NewtonPolynomial;
pub use polynomial::{BareQuadratic, Constant, InterceptlessLine, Line, Polynomial};
pub use power::{PowerFunction, PowerFunctionCombination, Sesquilinear};
pub use threshold::ThresholdFunction;

/// Exponents closer to zero than this are treated as exactly zero.
pub const EXPONENT_TOLERANCE: f64 = 1e-15;

/// A real function of one variable.
///
/// Implementors only provide [`value`](UnivariateFunction::value); residuals,
/// grid evaluation and the trimmed fit criteria are derived from it.
pub trait UnivariateFunction {
    /// Evaluates the function at `x`.
    fn value(&self, x: f64) -> f64;

    /// Residual of the observation `(x, y)`, i.e. `y - value(x)`.
    fn residual(&self, x: f64, y: f64) -> f64 {
        y - self.value(x)
    }

    /// Residual of a `[x, y]` coordinate pair.
    fn residual_point(&self, point: [f64; 2]) -> f64 {
        self.residual(point[0], point[1])
    }

    /// Evaluates the function at every x value of a grid.
    fn values(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|x_val| self.value(x_val))
    }

    /// Calculates the residuals (y_obs - y_pred) for paired observations.
    ///
    /// # Arguments
    ///
    /// * `x` - The independent variable values
    /// * `y` - The observed dependent variable values
    ///
    /// # Returns
    ///
    /// * The residuals, or `InvalidArgument` if `x` and `y` differ in length
    fn residuals(&self, x: &Array1<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
        if x.len() != y.len() {
            return Err(RobustFitError::invalid(format!(
                "Expected {} observed values, got {}",
                x.len(),
                y.len()
            )));
        }

        Ok(y - &self.values(x))
    }

    /// Sum of the `c` smallest squared residuals over `points`.
    ///
    /// See [`trimmed::trimmed_squares`].
    fn trimmed_squares(&self, points: &PointSet<'_>, scratch: &mut [f64], c: usize) -> Result<f64> {
        trimmed::trimmed_squares(self, points, scratch, c)
    }

    /// Trimmed sum plus the full squared residuals of the `support` points.
    fn trimmed_squares_with_support(
        &self,
        points: &PointSet<'_>,
        support: &PointSet<'_>,
        scratch: &mut [f64],
        c: usize,
    ) -> Result<f64> {
        trimmed::trimmed_squares_with_support(self, points, support, scratch, c)
    }

    /// Windsorized trimmed sum of squares.
    ///
    /// See [`trimmed::trimmed_w_squares`].
    fn trimmed_w_squares(
        &self,
        points: &PointSet<'_>,
        scratch: &mut [f64],
        c: usize,
    ) -> Result<f64> {
        trimmed::trimmed_w_squares(self, points, scratch, c)
    }

    /// Windsorized trimmed sum plus the full squared residuals of the `support` points.
    fn trimmed_w_squares_with_support(
        &self,
        points: &PointSet<'_>,
        support: &PointSet<'_>,
        scratch: &mut [f64],
        c: usize,
    ) -> Result<f64> {
        trimmed::trimmed_w_squares_with_support(self, points, support, scratch, c)
    }
}

/// Validates a derivative order coming from the public API.
pub(crate) fn derivative_order(order: i32) -> Result<usize> {
    usize::try_from(order)
        .map_err(|_| RobustFitError::invalid(format!("negative derivative order {}", order)))
}

/// Validates a horizontal scale factor.
pub(crate) fn check_scale(h: f64) -> Result<()> {
    if h == 0.0 || !h.is_finite() {
        return Err(RobustFitError::invalid(format!(
            "horizontal scale must be finite and non-zero, got {}",
            h
        )));
    }
    Ok(())
}

/// Tag naming a [`FittedFunction`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Constant,
    InterceptlessLine,
    Line,
    Polynomial,
    PowerFunction,
    PowerFunctionCombination,
    Sesquilinear,
    BareQuadratic,
    Threshold,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionKind::Constant => "Constant",
            FunctionKind::InterceptlessLine => "Interceptless line",
            FunctionKind::Line => "Line",
            FunctionKind::Polynomial => "Polynomial",
            FunctionKind::PowerFunction => "Power function",
            FunctionKind::PowerFunctionCombination => "Power function combination",
            FunctionKind::Sesquilinear => "Sesquilinear",
            FunctionKind::BareQuadratic => "Bare quadratic",
            FunctionKind::Threshold => "Threshold",
        };
        write!(f, "{}", name)
    }
}

/// Any of the univariate fitted models.
///
/// Derivatives and rescaling may change the variant (the derivative of a
/// [`Line`] is a [`Constant`]), so those operations return a `FittedFunction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FittedFunction {
    Constant(Constant),
    InterceptlessLine(InterceptlessLine),
    Line(Line),
    Polynomial(Polynomial),
    PowerFunction(PowerFunction),
    PowerFunctionCombination(PowerFunctionCombination),
    Sesquilinear(Sesquilinear),
    BareQuadratic(BareQuadratic),
    Threshold(ThresholdFunction),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            FittedFunction::Constant($f) => $body,
            FittedFunction::InterceptlessLine($f) => $body,
            FittedFunction::Line($f) => $body,
            FittedFunction::Polynomial($f) => $body,
            FittedFunction::PowerFunction($f) => $body,
            FittedFunction::PowerFunctionCombination($f) => $body,
            FittedFunction::Sesquilinear($f) => $body,
            FittedFunction::BareQuadratic($f) => $body,
            FittedFunction::Threshold($f) => $body,
        }
    };
}

impl FittedFunction {
    /// The zero function, `Constant(0)`.
    pub fn zero() -> Self {
        FittedFunction::Constant(Constant::new(0.0))
    }

    /// Which variant this is.
    pub fn kind(&self) -> FunctionKind {
        match self {
            FittedFunction::Constant(_) => FunctionKind::Constant,
            FittedFunction::InterceptlessLine(_) => FunctionKind::InterceptlessLine,
            FittedFunction::Line(_) => FunctionKind::Line,
            FittedFunction::Polynomial(_) => FunctionKind::Polynomial,
            FittedFunction::PowerFunction(_) => FunctionKind::PowerFunction,
            FittedFunction::PowerFunctionCombination(_) => FunctionKind::PowerFunctionCombination,
            FittedFunction::Sesquilinear(_) => FunctionKind::Sesquilinear,
            FittedFunction::BareQuadratic(_) => FunctionKind::BareQuadratic,
            FittedFunction::Threshold(_) => FunctionKind::Threshold,
        }
    }

    /// Returns `s * f` as a new function of the same kind.
    pub fn multiply(&self, s: f64) -> FittedFunction {
        dispatch!(self, f => f.multiply(s).into())
    }

    /// The symbolic derivative of the given order.
    ///
    /// Order 0 returns an equal function. Orders beyond the effective degree
    /// return the zero constant. A negative order is an `InvalidArgument`.
    pub fn derivative(&self, order: i32) -> Result<FittedFunction> {
        dispatch!(self, f => f.derivative(order))
    }

    /// Coefficient of `x^power`, or 0 when the model has no such term.
    pub fn coefficient(&self, power: f64) -> f64 {
        dispatch!(self, f => f.coefficient(power))
    }

    /// Number of raw parameters.
    pub fn parameter_count(&self) -> usize {
        dispatch!(self, f => f.parameter_count())
    }

    /// The raw parameter vector, in constructor order.
    pub fn parameters(&self) -> Vec<f64> {
        dispatch!(self, f => f.parameters())
    }

    /// Returns `g` with `g(x) = f(x / h)`.
    pub fn h_scaled(&self, h: f64) -> Result<FittedFunction> {
        dispatch!(self, f => f.h_scaled(h).map(Into::into))
    }

    /// Serializes the function as a JSON object tagged with its kind.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a function serialized with [`FittedFunction::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl UnivariateFunction for FittedFunction {
    fn value(&self, x: f64) -> f64 {
        dispatch!(self, f => f.value(x))
    }
}

impl fmt::Display for FittedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.kind(), self.parameters())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FittedFunction {
                fn from(f: $ty) -> Self {
                    FittedFunction::$variant(f)
                }
            }
        )*
    };
}

impl_from_variant! {
    Constant => Constant,
    InterceptlessLine => InterceptlessLine,
    Line => Line,
    Polynomial => Polynomial,
    PowerFunction => PowerFunction,
    PowerFunctionCombination => PowerFunctionCombination,
    Sesquilinear => Sesquilinear,
    BareQuadratic => BareQuadratic,
    Threshold => ThresholdFunction,
}
