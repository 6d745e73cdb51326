//! Wires Diesel adapters and domain services into [`HttpState`].

use std::sync::Arc;

use calculator_backend::domain::ports::PasswordHashError;
use calculator_backend::domain::{CalculatorService, UserRegistrationService};
use calculator_backend::inbound::http::state::HttpState;
use calculator_backend::outbound::hashing::Argon2PasswordHasher;
use calculator_backend::outbound::persistence::{
    DbPool, DieselCalculationRepository, DieselUserRepository,
};

/// Build the HTTP state from a database pool.
///
/// Both services share one user repository and one hasher so the default
/// user and registered users live behind the same adapters.
///
/// # Errors
/// Returns [`PasswordHashError`] when the hasher's cost parameters are
/// rejected.
pub(crate) fn build_http_state(pool: &DbPool) -> Result<HttpState, PasswordHashError> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let calculations = Arc::new(DieselCalculationRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new()?);

    let registration = UserRegistrationService::new(Arc::clone(&users), Arc::clone(&hasher));
    let calculator = CalculatorService::new(calculations, users, hasher);

    Ok(HttpState::new(Arc::new(registration), Arc::new(calculator)))
}
