//! Driving port for like mutations.

use async_trait::async_trait;

use crate::domain::{Error, Like, LikeChanges, LikeId, NewLike};

/// Creating, reassigning and removing likes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesCommand: Send + Sync {
    /// Like a tweet.
    async fn create(&self, like: NewLike) -> Result<Like, Error>;

    /// Reassign a like.
    async fn update(&self, id: LikeId, changes: LikeChanges) -> Result<Like, Error>;

    /// Remove a like.
    async fn delete(&self, id: LikeId) -> Result<Like, Error>;
}
