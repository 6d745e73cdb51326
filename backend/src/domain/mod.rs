//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services that implement the calculator and
//! registration use-cases. Nothing in here knows about HTTP or Diesel.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — registered account.
//! - Calculation (alias to `calculation::Calculation`) — stored arithmetic
//!   record.
//! - UserRegistrationService, CalculatorService — driving-port
//!   implementations.

pub mod calculation;
mod calculator_service;
mod default_user;
pub mod error;
pub mod operations;
pub mod ports;
mod trace_id;
pub mod user;
mod user_registration_service;

pub use self::calculation::{
    Calculation, CalculationId, Evaluation, NewCalculation, Operands,
};
pub use self::calculator_service::CalculatorService;
pub use self::default_user::{
    DEFAULT_EMAIL, DEFAULT_PASSWORD, DEFAULT_USERNAME, DefaultUserProvisioner,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, FieldError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, Password, PasswordHash, User, UserId, UserRegistration,
    UserValidationError, Username,
};
pub use self::user_registration_service::UserRegistrationService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use calculator_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<f64> {
///     Err(Error::division_by_zero("Cannot divide by zero"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
