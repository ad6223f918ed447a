//! Port abstraction for like persistence.

use async_trait::async_trait;

use crate::domain::{Like, LikeId, LikeView, NewLike};

use super::RepositoryError;

/// Storage of likes, unique per `(user, tweet)` pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Insert a like.
    async fn insert(&self, like: NewLike) -> Result<Like, RepositoryError>;

    /// Fetch a like by identifier.
    async fn find_by_id(&self, id: LikeId) -> Result<Option<Like>, RepositoryError>;

    /// Fetch the like linking this exact pair.
    async fn find_by_pair(&self, pair: NewLike) -> Result<Option<Like>, RepositoryError>;

    /// Every like with its user and tweet, newest first.
    async fn list(&self) -> Result<Vec<LikeView>, RepositoryError>;

    /// Reassign a like. `None` when it does not exist.
    async fn update(&self, id: LikeId, pair: NewLike) -> Result<Option<Like>, RepositoryError>;

    /// Remove a like. `None` when it does not exist.
    async fn delete(&self, id: LikeId) -> Result<Option<Like>, RepositoryError>;
}
