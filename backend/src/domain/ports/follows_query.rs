//! Driving port for follow reads.

use async_trait::async_trait;

use crate::domain::{Error, Follow, FollowView};

/// Follow listing and lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowsQuery: Send + Sync {
    /// Every edge with both users' identities.
    async fn list(&self) -> Result<Vec<FollowView>, Error>;

    /// One edge. `raw_id` must be positive.
    async fn get(&self, raw_id: i64) -> Result<Follow, Error>;
}
