//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, User, UserRegistration};

/// Domain use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistrationCommand: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the username or
    /// email is already taken.
    async fn register(&self, registration: UserRegistration) -> Result<User, Error>;
}
