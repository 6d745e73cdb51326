//! Driving port for arithmetic requests.

use async_trait::async_trait;

use crate::domain::operations::Operation;
use crate::domain::{CalculationId, Error, Operands, UserId};

/// A single arithmetic request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    pub operation: Operation,
    pub operands: Operands,
    /// Acting user; `None` attributes the calculation to the default user.
    pub user_id: Option<UserId>,
}

/// Result returned to the caller once the calculation is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationOutcome {
    pub result: f64,
    pub calculation_id: CalculationId,
}

/// Domain use-case port for evaluating and recording calculations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculatorCommand: Send + Sync {
    /// Evaluate the request and store it.
    ///
    /// A zero divisor fails with [`crate::domain::ErrorCode::DivisionByZero`]
    /// before anything is written.
    async fn calculate(&self, request: CalculationRequest) -> Result<CalculationOutcome, Error>;
}
