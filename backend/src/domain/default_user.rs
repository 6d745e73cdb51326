//! The fallback user that anonymous calculations are attributed to.
//!
//! Every calculation row must reference a user. Requests that do not name one
//! are owned by a well-known default account, created lazily on first use.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{PasswordHasher, UserRepository};
use crate::domain::user_registration_service::hash_password;
use crate::domain::{EmailAddress, Error, NewUser, Password, User, Username};

/// Username of the default account.
pub const DEFAULT_USERNAME: &str = "default_user";
/// Email of the default account.
pub const DEFAULT_EMAIL: &str = "default@example.com";
/// Password of the default account.
pub const DEFAULT_PASSWORD: &str = "defaultpassword";

/// Whether `username` or `email` belongs to the default account.
pub(crate) fn is_reserved(username: &Username, email: &EmailAddress) -> bool {
    username.as_ref() == DEFAULT_USERNAME || email.as_ref().eq_ignore_ascii_case(DEFAULT_EMAIL)
}

/// Finds or creates the default account.
#[derive(Clone)]
pub struct DefaultUserProvisioner<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> DefaultUserProvisioner<U, H> {
    /// Create a provisioner backed by the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> DefaultUserProvisioner<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Return the default user, creating it if absent.
    ///
    /// Concurrent first calls converge on one row: creation goes through
    /// [`UserRepository::upsert_by_username`].
    pub async fn get_or_create(&self) -> Result<User, Error> {
        let username = Self::username()?;
        if let Some(user) = self.users.find_by_username(&username).await? {
            return Ok(user);
        }

        let email = EmailAddress::new(DEFAULT_EMAIL)
            .map_err(|err| Error::internal(format!("default email invalid: {err}")))?;
        let password_hash =
            hash_password(Arc::clone(&self.hasher), Password::trusted(DEFAULT_PASSWORD)).await?;
        let user = self
            .users
            .upsert_by_username(&NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id(), "default user provisioned");
        Ok(user)
    }

    fn username() -> Result<Username, Error> {
        Username::new(DEFAULT_USERNAME)
            .map_err(|err| Error::internal(format!("default username invalid: {err}")))
    }
}
