//! Driving port for account mutations.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User, UserId, UserUpdate};

/// Account sign-up, update and removal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create an account.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Apply a partial update to an account.
    async fn update(&self, id: UserId, update: UserUpdate) -> Result<User, Error>;

    /// Remove an account and everything that references it.
    async fn delete(&self, id: UserId) -> Result<User, Error>;
}
