//! Driving port for tweet listings.

use async_trait::async_trait;

use crate::domain::{Error, TweetThread, UserId};

/// Enriched tweet listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetsQuery: Send + Sync {
    /// Every original tweet, newest first.
    async fn list_all(&self) -> Result<Vec<TweetThread>, Error>;

    /// Every tweet of one author. `raw_user_id` is validated here so that
    /// invalid and empty results share the not-found outcome.
    async fn list_by_user(&self, raw_user_id: i64) -> Result<Vec<TweetThread>, Error>;

    /// Original tweets of `user` and of everyone `user` follows.
    async fn feed(&self, user: UserId) -> Result<Vec<TweetThread>, Error>;
}
