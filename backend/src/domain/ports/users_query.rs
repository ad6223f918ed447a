//! Driving port for account reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfile};

/// Account listing and lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, with relations when `include_relations` is set.
    async fn list(&self, include_relations: bool) -> Result<Vec<UserProfile>, Error>;

    /// One user by identifier.
    async fn get(&self, id: UserId) -> Result<User, Error>;
}
