//! Port for issuing and checking session tokens.

use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token services.
    pub enum TokenError {
        /// A token could not be produced.
        Signing { message: String } => "token signing failed: {message}",
        /// The presented token is malformed, expired or forged.
        Invalid { message: String } => "invalid token: {message}",
    }
}

/// Signed, caller-identity-bearing credentials.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token binding `user`.
    fn issue(&self, user: UserId) -> Result<SessionToken, TokenError>;

    /// Verify a presented token and return the user it binds.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
