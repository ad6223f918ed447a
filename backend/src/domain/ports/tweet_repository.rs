//! Port abstraction for tweet persistence.

use async_trait::async_trait;

use crate::domain::{NewTweet, Tweet, TweetChanges, TweetFilter, TweetId, TweetThread};

use super::RepositoryError;

/// Storage of tweets and replies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Insert a tweet. A dangling author or parent surfaces as
    /// [`RepositoryError::Reference`].
    async fn insert(&self, tweet: &NewTweet) -> Result<Tweet, RepositoryError>;

    /// Fetch a tweet by identifier.
    async fn find_by_id(&self, id: TweetId) -> Result<Option<Tweet>, RepositoryError>;

    /// Tweets matching `filter`, newest first, each with its author, direct
    /// replies and likes.
    async fn list_threads(&self, filter: &TweetFilter)
    -> Result<Vec<TweetThread>, RepositoryError>;

    /// Replace content and kind. `None` when the tweet does not exist.
    async fn update(
        &self,
        id: TweetId,
        changes: &TweetChanges,
    ) -> Result<Option<Tweet>, RepositoryError>;

    /// Remove a tweet with its replies and likes. `None` when absent.
    async fn delete(&self, id: TweetId) -> Result<Option<Tweet>, RepositoryError>;
}
