//! Driving port for like reads.

use async_trait::async_trait;

use crate::domain::{Error, Like, LikeView};

/// Like listing and lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesQuery: Send + Sync {
    /// Every like with its user and tweet.
    async fn list(&self) -> Result<Vec<LikeView>, Error>;

    /// One like. `raw_id` must be positive.
    async fn get(&self, raw_id: i64) -> Result<Like, Error>;
}
