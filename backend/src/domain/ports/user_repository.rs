//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, NewUser, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint on username or email rejected the write.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

/// Storage for registered users.
///
/// Every mutating method runs in its own transaction: it either commits in
/// full or leaves no trace.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch any user holding either `username` or `email`.
    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user.
    ///
    /// Returns [`UserPersistenceError::Duplicate`] when the username or email
    /// is already taken, including when a concurrent insert wins the race.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Insert `user` unless a row with the same username exists, then return
    /// the stored row. Repeated calls are idempotent.
    ///
    /// Returns [`UserPersistenceError::Query`] when another account already
    /// holds the email and no row for the username exists.
    async fn upsert_by_username(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}

/// Message returned to clients when registration hits an existing user.
pub const USER_EXISTS_MESSAGE: &str = "User with this username or email already exists";

impl From<UserPersistenceError> for Error {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
            UserPersistenceError::Duplicate { .. } => Error::conflict(USER_EXISTS_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate("users_email_key"), ErrorCode::Conflict)]
    fn maps_to_domain_error(#[case] error: UserPersistenceError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn duplicate_hides_constraint_name() {
        let error = Error::from(UserPersistenceError::duplicate("users_email_key"));
        assert_eq!(error.message(), USER_EXISTS_MESSAGE);
        assert!(error.message().to_lowercase().contains("exists"));
    }
}
