//! Tweet services: posting, replies, listings and the home feed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    FollowRepository, RepositoryError, TweetRepository, TweetsCommand, TweetsQuery, account_gone,
    map_repository_error,
};
use crate::domain::{
    Error, NewTweet, Tweet, TweetChanges, TweetContent, TweetFilter, TweetId, TweetThread, UserId,
};

const AUTHOR_REFERENCE: &str = "tweets_author_id_fkey";

fn tweet_not_found(id: TweetId) -> Error {
    Error::not_found(format!("tweet {id} not found"))
}

fn map_update_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Constraint { .. } => Error::invalid_request(
            "a reply must keep its parent tweet and an original tweet cannot have one",
        ),
        other => map_repository_error(other),
    }
}

/// Tweet service implementing the tweet driving ports.
pub struct TweetService<T: ?Sized, F: ?Sized> {
    tweets: Arc<T>,
    follows: Arc<F>,
}

impl<T: ?Sized, F: ?Sized> TweetService<T, F> {
    /// Create the service. Follow edges are needed to assemble feeds.
    pub const fn new(tweets: Arc<T>, follows: Arc<F>) -> Self {
        Self { tweets, follows }
    }
}

#[async_trait]
impl<T, F> TweetsCommand for TweetService<T, F>
where
    T: TweetRepository + ?Sized,
    F: FollowRepository + ?Sized,
{
    async fn create(&self, author: UserId, content: TweetContent) -> Result<Tweet, Error> {
        self.tweets
            .insert(&NewTweet::original(content, author))
            .await
            .map_err(|error| match error {
                RepositoryError::Reference { constraint } if constraint == AUTHOR_REFERENCE => {
                    account_gone()
                }
                other => map_repository_error(other),
            })
    }

    async fn reply(
        &self,
        parent: TweetId,
        author: UserId,
        content: TweetContent,
    ) -> Result<Tweet, Error> {
        if self
            .tweets
            .find_by_id(parent)
            .await
            .map_err(map_repository_error)?
            .is_none()
        {
            return Err(tweet_not_found(parent));
        }

        // The parent may vanish between the lookup and the insert; the foreign
        // key then reports a dangling reference.
        self.tweets
            .insert(&NewTweet::reply(content, author, parent))
            .await
            .map_err(|error| match error {
                RepositoryError::Reference { constraint } if constraint == AUTHOR_REFERENCE => {
                    account_gone()
                }
                RepositoryError::Reference { .. } => tweet_not_found(parent),
                other => map_repository_error(other),
            })
    }

    async fn update(&self, id: TweetId, changes: TweetChanges) -> Result<Tweet, Error> {
        self.tweets
            .update(id, &changes)
            .await
            .map_err(map_update_error)?
            .ok_or_else(|| tweet_not_found(id))
    }

    async fn delete(&self, id: TweetId) -> Result<Tweet, Error> {
        self.tweets
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| tweet_not_found(id))
    }
}

#[async_trait]
impl<T, F> TweetsQuery for TweetService<T, F>
where
    T: TweetRepository + ?Sized,
    F: FollowRepository + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<TweetThread>, Error> {
        self.tweets
            .list_threads(&TweetFilter::originals())
            .await
            .map_err(map_repository_error)
    }

    async fn list_by_user(&self, raw_user_id: i64) -> Result<Vec<TweetThread>, Error> {
        let user = UserId::new(raw_user_id)
            .map_err(|_| Error::not_found(format!("user id {raw_user_id} is not valid")))?;

        let threads = self
            .tweets
            .list_threads(&TweetFilter::by_author(user))
            .await
            .map_err(map_repository_error)?;
        if threads.is_empty() {
            return Err(Error::not_found(format!("no tweets found for user {user}")));
        }
        Ok(threads)
    }

    async fn feed(&self, user: UserId) -> Result<Vec<TweetThread>, Error> {
        // Two reads without a shared snapshot: edges created or removed in
        // between are reflected only on the next request.
        let mut authors = self
            .follows
            .followee_ids(user)
            .await
            .map_err(map_repository_error)?;
        authors.push(user);
        authors.sort_unstable();
        authors.dedup();
        debug!(user_id = %user, authors = authors.len(), "assembling feed");

        self.tweets
            .list_threads(&TweetFilter::originals_by(authors))
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "tweet_service_tests.rs"]
mod tests;
