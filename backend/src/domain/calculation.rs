//! Calculation records.
//!
//! A calculation captures one evaluated operation together with the user it
//! was performed for. Records are immutable once written; the result is
//! always derived from the operands by the operation engine.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::UserId;
use crate::domain::operations::{ArithmeticError, Operation};

/// Database-generated calculation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalculationId(i64);

impl CalculationId {
    pub(crate) fn from_db(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The two operands of an arithmetic request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operands {
    pub x: f64,
    pub y: f64,
}

impl Operands {
    /// Pair `x` and `y`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The outcome of running the operation engine on a pair of operands.
///
/// The only constructor runs the engine, so `result` can never disagree with
/// the operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    operation: Operation,
    operands: Operands,
    result: f64,
}

impl Evaluation {
    /// Evaluate `operation` over `operands`.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::operations::{ArithmeticError, Operation};
    /// use calculator_backend::domain::{Evaluation, Operands};
    ///
    /// let sum = Evaluation::run(Operation::Add, Operands::new(3.0, 5.0)).expect("sum");
    /// assert_eq!(sum.result(), 8.0);
    ///
    /// let err = Evaluation::run(Operation::Divide, Operands::new(1.0, 0.0)).unwrap_err();
    /// assert_eq!(err, ArithmeticError::DivisionByZero);
    /// ```
    pub fn run(operation: Operation, operands: Operands) -> Result<Self, ArithmeticError> {
        let result = operation.apply(operands.x, operands.y)?;
        Ok(Self {
            operation,
            operands,
            result,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operands(&self) -> Operands {
        self.operands
    }

    pub fn result(&self) -> f64 {
        self.result
    }
}

/// An evaluation attributed to a user, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    evaluation: Evaluation,
    user_id: UserId,
}

impl NewCalculation {
    /// Attribute `evaluation` to `user_id`.
    pub fn new(evaluation: Evaluation, user_id: UserId) -> Self {
        Self {
            evaluation,
            user_id,
        }
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// A stored calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub id: CalculationId,
    pub operation: Operation,
    pub operands: Operands,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
}
