//! User registration domain service.
//!
//! Implements [`UserRegistrationCommand`]: refuses the default account's
//! identity, checks for an existing username or email, hashes the password
//! off the async executor, and inserts the row.
//! A unique-constraint race between the pre-check and the insert surfaces as
//! the same conflict the pre-check would have produced.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::default_user::is_reserved;
use crate::domain::ports::{
    PasswordHasher, USER_EXISTS_MESSAGE, UserRegistrationCommand, UserRepository,
};
use crate::domain::{Error, NewUser, Password, PasswordHash, User, UserRegistration};

/// Registration service implementing the driving port.
#[derive(Clone)]
pub struct UserRegistrationService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserRegistrationService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

/// Hash `password` on the blocking pool.
pub(crate) async fn hash_password<H>(
    hasher: Arc<H>,
    password: Password,
) -> Result<PasswordHash, Error>
where
    H: PasswordHasher + 'static,
{
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(Error::from)
}

#[async_trait]
impl<U, H> UserRegistrationCommand for UserRegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: UserRegistration) -> Result<User, Error> {
        let UserRegistration {
            username,
            email,
            password,
        } = registration;

        if is_reserved(&username, &email) {
            warn!(username = %username, "registration rejected: reserved identity");
            return Err(Error::conflict(USER_EXISTS_MESSAGE));
        }

        if self
            .users
            .find_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            warn!(username = %username, "registration rejected: user exists");
            return Err(Error::conflict(USER_EXISTS_MESSAGE));
        }

        let password_hash = hash_password(Arc::clone(&self.hasher), password).await?;
        let user = self
            .users
            .insert(&NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}
