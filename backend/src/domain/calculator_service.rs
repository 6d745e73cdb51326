//! Calculator domain service.
//!
//! Evaluates first, then resolves the acting user, then stores the record. A
//! failed evaluation therefore never touches the database.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::operations::ArithmeticError;
use crate::domain::ports::{
    CalculationOutcome, CalculationRepository, CalculationRequest, CalculatorCommand,
    PasswordHasher, UserRepository,
};
use crate::domain::{DefaultUserProvisioner, Error, Evaluation, NewCalculation, UserId};

/// Calculator service implementing the driving port.
#[derive(Clone)]
pub struct CalculatorService<C, U, H> {
    calculations: Arc<C>,
    users: Arc<U>,
    default_user: DefaultUserProvisioner<U, H>,
}

impl<C, U, H> CalculatorService<C, U, H> {
    /// Create a new service with the given repositories and hasher.
    ///
    /// The hasher is only used when the default user has to be created.
    pub fn new(calculations: Arc<C>, users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            calculations,
            default_user: DefaultUserProvisioner::new(Arc::clone(&users), hasher),
            users,
        }
    }
}

impl<C, U, H> CalculatorService<C, U, H>
where
    C: CalculationRepository,
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    fn map_arithmetic_error(error: ArithmeticError) -> Error {
        match error {
            ArithmeticError::DivisionByZero => Error::division_by_zero(error.to_string()),
        }
    }

    async fn resolve_user(&self, requested: Option<UserId>) -> Result<UserId, Error> {
        match requested {
            Some(id) => self
                .users
                .find_by_id(id)
                .await?
                .map(|user| user.id())
                .ok_or_else(|| Error::not_found("User not found")),
            None => Ok(self.default_user.get_or_create().await?.id()),
        }
    }
}

#[async_trait]
impl<C, U, H> CalculatorCommand for CalculatorService<C, U, H>
where
    C: CalculationRepository,
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn calculate(&self, request: CalculationRequest) -> Result<CalculationOutcome, Error> {
        let evaluation = Evaluation::run(request.operation, request.operands)
            .map_err(Self::map_arithmetic_error)?;
        let user_id = self.resolve_user(request.user_id).await?;
        debug!(operation = %request.operation, user_id = %user_id, "recording calculation");

        let stored = self
            .calculations
            .record(&NewCalculation::new(evaluation, user_id))
            .await?;

        info!(
            calculation_id = %stored.id,
            operation = %stored.operation,
            "calculation recorded"
        );
        Ok(CalculationOutcome {
            result: stored.result,
            calculation_id: stored.id,
        })
    }
}

#[cfg(test)]
mod tests;
