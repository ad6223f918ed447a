//! Port abstraction for follow-edge persistence.

use async_trait::async_trait;

use crate::domain::{Follow, FollowId, FollowView, NewFollow, UserId};

use super::RepositoryError;

/// Storage of follow edges, unique per ordered pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert an edge.
    async fn insert(&self, pair: NewFollow) -> Result<Follow, RepositoryError>;

    /// Fetch an edge by identifier.
    async fn find_by_id(&self, id: FollowId) -> Result<Option<Follow>, RepositoryError>;

    /// Fetch the edge for this exact ordered pair.
    async fn find_by_pair(&self, pair: NewFollow) -> Result<Option<Follow>, RepositoryError>;

    /// Identifiers of the users `follower` follows.
    async fn followee_ids(&self, follower: UserId) -> Result<Vec<UserId>, RepositoryError>;

    /// Every edge with both users' identities, newest first.
    async fn list(&self) -> Result<Vec<FollowView>, RepositoryError>;

    /// Reassign an edge. `None` when it does not exist.
    async fn update(&self, id: FollowId, pair: NewFollow)
    -> Result<Option<Follow>, RepositoryError>;

    /// Remove an edge. `None` when it does not exist.
    async fn delete(&self, id: FollowId) -> Result<Option<Follow>, RepositoryError>;
}
