//! Arithmetic operation engine.
//!
//! Plain IEEE-754 `f64` arithmetic with no rounding policy. Division by zero
//! (positive or negative) is the only failure and is reported as a typed
//! [`ArithmeticError`] instead of producing an infinity or NaN.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Message reported to clients on a zero divisor.
pub const DIVISION_BY_ZERO_MESSAGE: &str = "Cannot divide by zero";

/// Failure raised by the operation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("Cannot divide by zero")]
    DivisionByZero,
}

/// Return `x + y`.
pub fn add(x: f64, y: f64) -> f64 {
    debug!(x, y, "adding");
    x + y
}

/// Return `x - y`.
pub fn subtract(x: f64, y: f64) -> f64 {
    debug!(x, y, "subtracting");
    x - y
}

/// Return `x * y`.
pub fn multiply(x: f64, y: f64) -> f64 {
    debug!(x, y, "multiplying");
    x * y
}

/// Return `x / y`, failing when `y` is zero.
///
/// # Examples
/// ```
/// use calculator_backend::domain::operations::{ArithmeticError, divide};
///
/// assert_eq!(divide(10.0, 2.0), Ok(5.0));
/// assert_eq!(divide(10.0, 0.0), Err(ArithmeticError::DivisionByZero));
/// ```
pub fn divide(x: f64, y: f64) -> Result<f64, ArithmeticError> {
    if y == 0.0 {
        warn!(x, "division by zero attempted");
        return Err(ArithmeticError::DivisionByZero);
    }
    debug!(x, y, "dividing");
    Ok(x / y)
}

/// The fixed set of supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Every supported operation, in display order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Evaluate the operation on `x` and `y`.
    pub fn apply(self, x: f64, y: f64) -> Result<f64, ArithmeticError> {
        match self {
            Self::Add => Ok(add(x, y)),
            Self::Subtract => Ok(subtract(x, y)),
            Self::Multiply => Ok(multiply(x, y)),
            Self::Divide => divide(x, y),
        }
    }

    /// Name stored in the `calculations.operation` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}
