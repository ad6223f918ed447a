//! Driving port for credential checks.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Exchanges credentials for a session token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate by email or username.
    ///
    /// Unknown accounts fail with `Unauthorized`; a wrong password fails with
    /// `InvalidCredentials`.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;
}
