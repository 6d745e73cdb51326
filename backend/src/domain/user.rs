//! User data model and registration input validation.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use zeroize::Zeroizing;

use crate::domain::FieldError;

/// Minimum allowed username length, in characters.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed username length, in characters.
pub const USERNAME_MAX: usize = 50;
/// Minimum allowed password length, in characters.
pub const PASSWORD_MIN: usize = 6;
/// Maximum allowed password length, in characters.
pub const PASSWORD_MAX: usize = 72;
/// Upper bound on the length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors raised while constructing user value objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    BlankUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    InvalidEmail,
    PasswordTooShort { min: usize },
    PasswordTooLong { max: usize },
}

impl UserValidationError {
    /// Request field the failure belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::BlankUsername | Self::UsernameTooShort { .. } | Self::UsernameTooLong { .. } => {
                "username"
            }
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => "password",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::BlankUsername => "blank",
            Self::UsernameTooShort { .. } | Self::PasswordTooShort { .. } => "too_short",
            Self::UsernameTooLong { .. } | Self::PasswordTooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<&UserValidationError> for FieldError {
    fn from(value: &UserValidationError) -> Self {
        FieldError::new(value.field(), value.code(), value.to_string())
    }
}

/// Database-generated user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Wrap an identifier read back from storage.
    pub(crate) fn from_db(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::BlankUsername);
        }
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }

    pub(crate) fn from_db(username: String) -> Self {
        Self(username)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-atom local part; the domain needs at least one dot and labels
        // that neither start nor end with a hyphen.
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
            r"[A-Za-z](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid, unique email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.len() > EMAIL_MAX || !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    pub(crate) fn from_db(email: String) -> Self {
        Self(email)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text password held only for the duration of a request.
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(UserValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self(password))
    }

    /// Wrap a trusted constant (e.g. the default user's password) without
    /// applying length rules.
    pub(crate) fn trusted(password: &str) -> Self {
        Self(Zeroizing::new(password.to_owned()))
    }

    /// Expose the secret to the hashing adapter.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque salted hash as produced by the password hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Validated input for registering a new user.
#[derive(Debug, Clone)]
pub struct UserRegistration {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl UserRegistration {
    /// Validate every field, collecting all failures rather than stopping at
    /// the first one.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::UserRegistration;
    ///
    /// let registration =
    ///     UserRegistration::try_from_parts("ada", "ada@example.com", "secret123")
    ///         .expect("valid registration");
    /// assert_eq!(registration.username.as_ref(), "ada");
    ///
    /// let errors = UserRegistration::try_from_parts("a", "nope", "123").unwrap_err();
    /// assert_eq!(errors.len(), 3);
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, Vec<UserValidationError>> {
        let username = Username::new(username);
        let email = EmailAddress::new(email);
        let password = Password::new(password);

        match (username, email, password) {
            (Ok(username), Ok(email), Ok(password)) => Ok(Self {
                username,
                email,
                password,
            }),
            (username, email, password) => Err([username.err(), email.err(), password.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }
}

/// Row-ready user record: validated identity plus the password hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// Persisted application user.
///
/// ## Invariants
/// - `username` and `email` are unique across all users.
/// - `created_at` is assigned by storage and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            created_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
