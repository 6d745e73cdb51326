//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...`), so the salt and cost
//! parameters travel with the hash and older rows keep verifying after the
//! defaults change.
//!
//! Only the first [`MAX_PASSWORD_BYTES`] bytes of a password take part in
//! hashing or verification. Two passwords sharing that prefix are
//! indistinguishable.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use argon2::{PasswordHasher as _, PasswordVerifier as _};
use tracing::debug;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Bytes of input considered by the hasher.
pub const MAX_PASSWORD_BYTES: usize = 72;

const MIB: u32 = 1024;
const DEFAULT_MEMORY_COST_KIB: u32 = 19 * MIB;
const DEFAULT_TIME_COST: u32 = 2;
const DEFAULT_PARALLELISM: u32 = 1;

fn significant_bytes(password: &Password) -> &[u8] {
    let bytes = password.expose().as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

/// Salted Argon2id password hasher.
///
/// # Examples
///
/// ```
/// use calculator_backend::domain::Password;
/// use calculator_backend::domain::ports::PasswordHasher;
/// use calculator_backend::outbound::hashing::Argon2PasswordHasher;
///
/// let hasher = Argon2PasswordHasher::with_costs(8, 1, 1).expect("valid costs");
/// let password = Password::new("password123").expect("valid password");
/// let hash = hasher.hash(&password).expect("hash");
/// assert!(hasher.verify(&password, &hash));
/// ```
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Hasher with OWASP-recommended Argon2id costs.
    pub fn new() -> Result<Self, PasswordHashError> {
        Self::with_costs(DEFAULT_MEMORY_COST_KIB, DEFAULT_TIME_COST, DEFAULT_PARALLELISM)
    }

    /// Hasher with explicit memory (KiB), iteration and lane counts.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(significant_bytes(password), &salt)
            .map(|phc| PasswordHash::new(phc.to_string()))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        let Ok(parsed) = PhcString::new(hash.as_ref()) else {
            debug!("stored password hash is not a PHC string");
            return false;
        };
        self.argon2()
            .verify_password(significant_bytes(password), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_costs(8, 1, 1).expect("cheap test costs")
    }

    fn password(raw: &str) -> Password {
        Password::trusted(raw)
    }

    #[rstest]
    fn hash_is_salted_phc_string(hasher: Argon2PasswordHasher) {
        let secret = password("password123");
        let first = hasher.hash(&secret).expect("hash");
        let second = hasher.hash(&secret).expect("hash");

        assert!(first.as_ref().starts_with("$argon2id$"));
        assert!(!first.as_ref().contains("password123"));
        assert_ne!(first, second);
    }

    #[rstest]
    fn verify_accepts_only_the_original(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&password("password123")).expect("hash");

        assert!(hasher.verify(&password("password123"), &hash));
        assert!(!hasher.verify(&password("password124"), &hash));
    }

    #[rstest]
    fn bytes_past_the_limit_are_ignored(hasher: Argon2PasswordHasher) {
        let long = "a".repeat(100);
        let hash = hasher.hash(&password(&long)).expect("hash");

        assert!(hasher.verify(&password(&"a".repeat(MAX_PASSWORD_BYTES)), &hash));
        assert!(!hasher.verify(&password(&"a".repeat(MAX_PASSWORD_BYTES - 1)), &hash));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-hash")]
    #[case("$2b$12$abcdefghijklmnopqrstuv")]
    fn malformed_hashes_never_verify(hasher: Argon2PasswordHasher, #[case] stored: &str) {
        assert!(!hasher.verify(&password("password123"), &PasswordHash::new(stored)));
    }

    #[rstest]
    fn hashes_from_other_costs_still_verify(hasher: Argon2PasswordHasher) {
        let other = Argon2PasswordHasher::with_costs(16, 2, 1).expect("costs");
        let hash = other.hash(&password("password123")).expect("hash");

        assert!(hasher.verify(&password("password123"), &hash));
    }

    #[rstest]
    fn rejects_invalid_costs() {
        assert!(Argon2PasswordHasher::with_costs(8, 0, 1).is_err());
    }
}
