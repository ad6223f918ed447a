//! Repository ports over the shared in-memory state.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    FollowRepository, LikeRepository, RepositoryError, TweetRepository, UserRepository,
};
use crate::domain::{
    Follow, FollowId, FollowView, Like, LikeId, LikeView, NewFollow, NewLike, NewTweet, NewUser,
    StoredUser, Tweet, TweetChanges, TweetFilter, TweetId, TweetThread, User, UserChanges, UserId,
    UserProfile,
};
use crate::outbound::assembly::{
    assemble_follow_views, assemble_like_views, assemble_profiles, assemble_threads,
};

use super::state::{State, newest_first};

/// Cloneable handle to one in-memory social graph.
///
/// Every clone shares the same tables, so a single store can be handed to
/// all four repository slots.
#[derive(Debug, Clone, Default)]
pub struct InMemorySocialStore {
    state: Arc<Mutex<State>>,
}

impl InMemorySocialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemorySocialStore {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        self.lock()?.insert_user(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.user(id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .users()
            .find(|user| user.email == email || user.username == username)
            .cloned())
    }

    async fn find_credentials(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredUser>, RepositoryError> {
        let state = self.lock()?;
        let found = state
            .users()
            .find(|user| user.email == identifier || user.username == identifier)
            .map(|user| user.id);
        Ok(found.and_then(|id| state.user(id).cloned()))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users: Vec<User> = self.lock()?.users().cloned().collect();
        newest_first(&mut users, |user| (user.created_at, user.id));
        Ok(users)
    }

    async fn list_with_relations(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let state = self.lock()?;
        let mut users: Vec<User> = state.users().cloned().collect();
        let mut tweets: Vec<Tweet> = state.tweets().cloned().collect();
        let mut likes: Vec<Like> = state.likes().cloned().collect();
        let mut follows: Vec<Follow> = state.follows().cloned().collect();
        drop(state);

        newest_first(&mut users, |user| (user.created_at, user.id));
        newest_first(&mut tweets, |tweet| (tweet.created_at, tweet.id));
        newest_first(&mut likes, |like| (like.created_at, like.id));
        newest_first(&mut follows, |follow| (follow.created_at, follow.id));
        Ok(assemble_profiles(users, tweets, likes, follows))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError> {
        self.lock()?.update_user(id, changes)
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.delete_user(id))
    }
}

#[async_trait]
impl TweetRepository for InMemorySocialStore {
    async fn insert(&self, tweet: &NewTweet) -> Result<Tweet, RepositoryError> {
        self.lock()?.insert_tweet(tweet)
    }

    async fn find_by_id(&self, id: TweetId) -> Result<Option<Tweet>, RepositoryError> {
        Ok(self.lock()?.tweet(id).cloned())
    }

    async fn list_threads(
        &self,
        filter: &TweetFilter,
    ) -> Result<Vec<TweetThread>, RepositoryError> {
        let state = self.lock()?;
        let matches = |tweet: &&Tweet| {
            filter.kind.is_none_or(|kind| tweet.kind == kind)
                && filter
                    .authors
                    .as_ref()
                    .is_none_or(|authors| authors.contains(&tweet.author_id))
        };
        let mut roots: Vec<Tweet> = state.tweets().filter(matches).cloned().collect();
        newest_first(&mut roots, |tweet| (tweet.created_at, tweet.id));

        let root_ids: Vec<TweetId> = roots.iter().map(|tweet| tweet.id).collect();
        let mut replies: Vec<Tweet> = state
            .tweets()
            .filter(|tweet| tweet.reply_to_id.is_some_and(|parent| root_ids.contains(&parent)))
            .cloned()
            .collect();
        replies.sort_by_key(|tweet| (tweet.created_at, tweet.id));
        let mut likes: Vec<Like> = state
            .likes()
            .filter(|like| root_ids.contains(&like.tweet_id))
            .cloned()
            .collect();
        newest_first(&mut likes, |like| (like.created_at, like.id));
        let authors = state.summaries();
        drop(state);

        assemble_threads(roots, replies, likes, &authors)
    }

    async fn update(
        &self,
        id: TweetId,
        changes: &TweetChanges,
    ) -> Result<Option<Tweet>, RepositoryError> {
        self.lock()?.update_tweet(id, changes)
    }

    async fn delete(&self, id: TweetId) -> Result<Option<Tweet>, RepositoryError> {
        Ok(self.lock()?.delete_tweet(id))
    }
}

#[async_trait]
impl LikeRepository for InMemorySocialStore {
    async fn insert(&self, like: NewLike) -> Result<Like, RepositoryError> {
        self.lock()?.insert_like(like)
    }

    async fn find_by_id(&self, id: LikeId) -> Result<Option<Like>, RepositoryError> {
        Ok(self.lock()?.like(id).cloned())
    }

    async fn find_by_pair(&self, pair: NewLike) -> Result<Option<Like>, RepositoryError> {
        Ok(self.lock()?.find_like_pair(pair))
    }

    async fn list(&self) -> Result<Vec<LikeView>, RepositoryError> {
        let state = self.lock()?;
        let mut likes: Vec<Like> = state.likes().cloned().collect();
        let users = state.summaries();
        let tweets = state.liked_tweets();
        drop(state);

        newest_first(&mut likes, |like| (like.created_at, like.id));
        assemble_like_views(likes, &users, &tweets)
    }

    async fn update(&self, id: LikeId, pair: NewLike) -> Result<Option<Like>, RepositoryError> {
        self.lock()?.update_like(id, pair)
    }

    async fn delete(&self, id: LikeId) -> Result<Option<Like>, RepositoryError> {
        Ok(self.lock()?.delete_like(id))
    }
}

#[async_trait]
impl FollowRepository for InMemorySocialStore {
    async fn insert(&self, pair: NewFollow) -> Result<Follow, RepositoryError> {
        self.lock()?.insert_follow(pair)
    }

    async fn find_by_id(&self, id: FollowId) -> Result<Option<Follow>, RepositoryError> {
        Ok(self.lock()?.follow(id).cloned())
    }

    async fn find_by_pair(&self, pair: NewFollow) -> Result<Option<Follow>, RepositoryError> {
        Ok(self.lock()?.find_follow_pair(pair))
    }

    async fn followee_ids(&self, follower: UserId) -> Result<Vec<UserId>, RepositoryError> {
        Ok(self
            .lock()?
            .follows()
            .filter(|follow| follow.follower_id == follower)
            .map(|follow| follow.followee_id)
            .collect())
    }

    async fn list(&self) -> Result<Vec<FollowView>, RepositoryError> {
        let state = self.lock()?;
        let mut follows: Vec<Follow> = state.follows().cloned().collect();
        let users = state.summaries();
        drop(state);

        newest_first(&mut follows, |follow| (follow.created_at, follow.id));
        assemble_follow_views(follows, &users)
    }

    async fn update(
        &self,
        id: FollowId,
        pair: NewFollow,
    ) -> Result<Option<Follow>, RepositoryError> {
        self.lock()?.update_follow(id, pair)
    }

    async fn delete(&self, id: FollowId) -> Result<Option<Follow>, RepositoryError> {
        Ok(self.lock()?.delete_follow(id))
    }
}
