//! Port abstraction for calculation persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, Error, NewCalculation};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by calculation repository adapters.
    pub enum CalculationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "calculation repository query failed: {message}",
        /// The referenced user row does not exist.
        UserNotFound { user_id: i64 } => "user {user_id} does not exist",
    }
}

/// Append-only storage for calculations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Store `calculation` and return the committed row.
    async fn record(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, CalculationPersistenceError>;

    /// Fetch a stored calculation by identifier.
    ///
    /// No request path reads calculations back. This exists so callers can
    /// confirm what [`CalculationRepository::record`] persisted; the
    /// repository integration tests rely on it.
    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError>;
}

impl From<CalculationPersistenceError> for Error {
    fn from(value: CalculationPersistenceError) -> Self {
        match value {
            CalculationPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            CalculationPersistenceError::Query { message } => Error::internal(message),
            CalculationPersistenceError::UserNotFound { .. } => Error::not_found("User not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(CalculationPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CalculationPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(CalculationPersistenceError::user_not_found(9_i64), ErrorCode::NotFound)]
    fn maps_to_domain_error(
        #[case] error: CalculationPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(error).code(), expected);
    }
}
