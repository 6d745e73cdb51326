//! Port for one-way password hashing.
//!
//! Implementations are CPU bound and synchronous; async callers should move
//! them onto a blocking thread.

use crate::domain::{Error, Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a hash.
    pub enum PasswordHashError {
        /// The underlying primitive rejected the input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted one-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash. Never fails: malformed hashes
    /// and mismatches both yield `false`.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}

impl From<PasswordHashError> for Error {
    fn from(value: PasswordHashError) -> Self {
        Error::internal(value.to_string())
    }
}
