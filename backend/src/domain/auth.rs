//! Credentials, password hashes and session tokens.
//!
//! Clear-text passwords live in zeroizing buffers and never implement a
//! revealing `Debug`.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::User;

/// Validation failures for login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Identifier was missing or blank once trimmed.
    #[error("email or username must not be empty")]
    EmptyIdentifier,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Clear-text password supplied by a caller.
///
/// Whitespace is preserved; only emptiness is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a non-empty password.
    pub fn new(raw: &str) -> Result<Self, LoginValidationError> {
        if raw.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Expose the clear text to a hasher.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// One-way hash of a password as produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use chirp::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "secret").unwrap();
/// assert_eq!(creds.identifier(), "ada");
/// assert_eq!(creds.password().expose(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Password,
}

impl LoginCredentials {
    /// Build credentials from an email-or-username identifier and a password.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyIdentifier);
        }
        Ok(Self {
            identifier: normalized.to_owned(),
            password: Password::new(password)?,
        })
    }

    /// Email or username to look up.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Supplied password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

/// Signed bearer token identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Token to present on authenticated routes.
    pub token: SessionToken,
    /// The authenticated account.
    pub user: User,
}
