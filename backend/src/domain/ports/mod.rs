//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod calculation_repository;
mod calculator_command;
mod password_hasher;
mod user_registration_command;
mod user_repository;

#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{CalculationPersistenceError, CalculationRepository};
#[cfg(test)]
pub use calculator_command::MockCalculatorCommand;
pub use calculator_command::{CalculationOutcome, CalculationRequest, CalculatorCommand};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_registration_command::MockUserRegistrationCommand;
pub use user_registration_command::UserRegistrationCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{USER_EXISTS_MESSAGE, UserPersistenceError, UserRepository};
