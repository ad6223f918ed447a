//! Driving port for tweet mutations.

use async_trait::async_trait;

use crate::domain::{Error, Tweet, TweetChanges, TweetContent, TweetId, UserId};

/// Posting, replying, editing and removing tweets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetsCommand: Send + Sync {
    /// Post an original tweet.
    async fn create(&self, author: UserId, content: TweetContent) -> Result<Tweet, Error>;

    /// Reply to an existing tweet.
    async fn reply(
        &self,
        parent: TweetId,
        author: UserId,
        content: TweetContent,
    ) -> Result<Tweet, Error>;

    /// Replace content and kind.
    async fn update(&self, id: TweetId, changes: TweetChanges) -> Result<Tweet, Error>;

    /// Remove a tweet.
    async fn delete(&self, id: TweetId) -> Result<Tweet, Error>;
}
