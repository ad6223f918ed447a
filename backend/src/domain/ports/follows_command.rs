//! Driving port for follow mutations.

use async_trait::async_trait;

use crate::domain::{Error, Follow, FollowChanges, FollowId, UserId};

/// Following, reassigning and unfollowing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowsCommand: Send + Sync {
    /// Make `follower` follow `followee`.
    async fn create(&self, follower: UserId, followee: UserId) -> Result<Follow, Error>;

    /// Reassign an edge.
    async fn update(&self, id: FollowId, changes: FollowChanges) -> Result<Follow, Error>;

    /// Remove an edge.
    async fn delete(&self, id: FollowId) -> Result<Follow, Error>;
}
