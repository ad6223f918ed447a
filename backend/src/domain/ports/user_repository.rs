//! Port abstraction for user persistence.

use async_trait::async_trait;

use crate::domain::{NewUser, StoredUser, User, UserChanges, UserId, UserProfile};

use super::RepositoryError;

/// Storage of user accounts.
///
/// Deleting a user also removes the tweets, likes and follows that reference
/// it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Email and username collisions surface as
    /// [`RepositoryError::Duplicate`].
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Find any user whose email equals `email` or whose username equals
    /// `username`.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepositoryError>;

    /// Fetch the account and password hash matching `identifier` as either
    /// email or username.
    async fn find_credentials(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredUser>, RepositoryError>;

    /// Every user, newest first.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Every user with tweets, likes and follow relations, newest first.
    async fn list_with_relations(&self) -> Result<Vec<UserProfile>, RepositoryError>;

    /// Apply a partial update. `None` when the user does not exist.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError>;

    /// Remove a user. `None` when the user does not exist.
    async fn delete(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
