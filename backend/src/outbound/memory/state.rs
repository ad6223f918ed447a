//! Tables and integrity rules of the in-memory store.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Utc;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Follow, FollowId, Like, LikeId, LikedTweet, NewFollow, NewLike, NewTweet, NewUser,
    StoredUser, Tweet, TweetChanges, TweetId, TweetKind, User, UserChanges, UserId,
    UserSummary,
};
use crate::outbound::assembly::index_summaries;

#[derive(Debug, Default)]
struct Sequences {
    users: i32,
    tweets: i32,
    likes: i32,
    follows: i32,
}

fn next_id(counter: &mut i32) -> Result<i32, RepositoryError> {
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| RepositoryError::query("identifier sequence exhausted"))?;
    Ok(*counter)
}

/// Sort newest first, breaking timestamp ties by descending id.
pub(super) fn newest_first<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by_key(|item| Reverse(key(item)));
}

#[derive(Debug, Default)]
pub(super) struct State {
    users: BTreeMap<UserId, StoredUser>,
    tweets: BTreeMap<TweetId, Tweet>,
    likes: BTreeMap<LikeId, Like>,
    follows: BTreeMap<FollowId, Follow>,
    sequences: Sequences,
}

impl State {
    pub(super) fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values().map(|stored| &stored.user)
    }

    pub(super) fn tweets(&self) -> impl Iterator<Item = &Tweet> {
        self.tweets.values()
    }

    pub(super) fn likes(&self) -> impl Iterator<Item = &Like> {
        self.likes.values()
    }

    pub(super) fn follows(&self) -> impl Iterator<Item = &Follow> {
        self.follows.values()
    }

    pub(super) fn summaries(&self) -> HashMap<UserId, UserSummary> {
        index_summaries(self.users().map(User::summary))
    }

    pub(super) fn liked_tweets(&self) -> HashMap<TweetId, LikedTweet> {
        self.tweets
            .values()
            .map(|tweet| {
                (
                    tweet.id,
                    LikedTweet {
                        id: tweet.id,
                        content: tweet.content.clone(),
                    },
                )
            })
            .collect()
    }

    pub(super) fn user(&self, id: UserId) -> Option<&StoredUser> {
        self.users.get(&id)
    }

    pub(super) fn tweet(&self, id: TweetId) -> Option<&Tweet> {
        self.tweets.get(&id)
    }

    pub(super) fn like(&self, id: LikeId) -> Option<&Like> {
        self.likes.get(&id)
    }

    pub(super) fn follow(&self, id: FollowId) -> Option<&Follow> {
        self.follows.get(&id)
    }

    fn ensure_identity_free(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        except: Option<UserId>,
    ) -> Result<(), RepositoryError> {
        for user in self.users().filter(|user| Some(user.id) != except) {
            if email == Some(user.email.as_str()) {
                return Err(RepositoryError::duplicate("users_email_key"));
            }
            if username == Some(user.username.as_str()) {
                return Err(RepositoryError::duplicate("users_username_key"));
            }
        }
        Ok(())
    }

    fn ensure_user(&self, id: UserId, constraint: &str) -> Result<(), RepositoryError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::reference(constraint))
        }
    }

    pub(super) fn insert_user(&mut self, user: &NewUser) -> Result<User, RepositoryError> {
        self.ensure_identity_free(Some(&user.email), Some(&user.username), None)?;
        let id = UserId::from_store(next_id(&mut self.sequences.users)?);
        let now = Utc::now();
        let record = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(
            id,
            StoredUser {
                user: record.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(record)
    }

    pub(super) fn update_user(
        &mut self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError> {
        if !self.users.contains_key(&id) {
            return Ok(None);
        }
        self.ensure_identity_free(changes.email.as_deref(), changes.username.as_deref(), Some(id))?;
        let Some(stored) = self.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            stored.user.name.clone_from(name);
        }
        if let Some(email) = &changes.email {
            stored.user.email.clone_from(email);
        }
        if let Some(username) = &changes.username {
            stored.user.username.clone_from(username);
        }
        if let Some(hash) = &changes.password_hash {
            stored.password_hash = hash.clone();
        }
        stored.user.updated_at = Utc::now();
        Ok(Some(stored.user.clone()))
    }

    /// Remove a user together with everything that references it.
    pub(super) fn delete_user(&mut self, id: UserId) -> Option<User> {
        let removed = self.users.remove(&id)?;
        let authored: Vec<TweetId> = self
            .tweets
            .values()
            .filter(|tweet| tweet.author_id == id)
            .map(|tweet| tweet.id)
            .collect();
        self.remove_tweets(authored);
        self.likes.retain(|_, like| like.user_id != id);
        self.follows
            .retain(|_, follow| follow.follower_id != id && follow.followee_id != id);
        Some(removed.user)
    }

    fn check_tweet_shape(
        content: &str,
        kind: TweetKind,
        reply_to: Option<TweetId>,
    ) -> Result<(), RepositoryError> {
        if content.trim().is_empty() {
            return Err(RepositoryError::constraint("tweets_content_not_blank"));
        }
        if (kind == TweetKind::Reply) != reply_to.is_some() {
            return Err(RepositoryError::constraint("tweets_reply_link"));
        }
        Ok(())
    }

    pub(super) fn insert_tweet(&mut self, tweet: &NewTweet) -> Result<Tweet, RepositoryError> {
        Self::check_tweet_shape(&tweet.content, tweet.kind, tweet.reply_to_id)?;
        self.ensure_user(tweet.author_id, "tweets_author_id_fkey")?;
        let orphaned = tweet
            .reply_to_id
            .is_some_and(|parent| !self.tweets.contains_key(&parent));
        if orphaned {
            return Err(RepositoryError::reference("tweets_reply_to_id_fkey"));
        }
        let id = TweetId::from_store(next_id(&mut self.sequences.tweets)?);
        let record = Tweet {
            id,
            content: tweet.content.clone(),
            kind: tweet.kind,
            author_id: tweet.author_id,
            reply_to_id: tweet.reply_to_id,
            created_at: Utc::now(),
        };
        self.tweets.insert(id, record.clone());
        Ok(record)
    }

    pub(super) fn update_tweet(
        &mut self,
        id: TweetId,
        changes: &TweetChanges,
    ) -> Result<Option<Tweet>, RepositoryError> {
        let Some(tweet) = self.tweets.get_mut(&id) else {
            return Ok(None);
        };
        Self::check_tweet_shape(changes.content.as_str(), changes.kind, tweet.reply_to_id)?;
        tweet.content = changes.content.as_str().to_owned();
        tweet.kind = changes.kind;
        Ok(Some(tweet.clone()))
    }

    pub(super) fn delete_tweet(&mut self, id: TweetId) -> Option<Tweet> {
        let removed = self.tweets.get(&id).cloned()?;
        self.remove_tweets(vec![id]);
        Some(removed)
    }

    /// Remove tweets, their reply subtrees and every like on them.
    fn remove_tweets(&mut self, roots: Vec<TweetId>) {
        let mut doomed: BTreeSet<TweetId> = BTreeSet::new();
        let mut pending = roots;
        while let Some(id) = pending.pop() {
            if !doomed.insert(id) {
                continue;
            }
            pending.extend(
                self.tweets
                    .values()
                    .filter(|tweet| tweet.reply_to_id == Some(id))
                    .map(|tweet| tweet.id),
            );
        }
        self.tweets.retain(|id, _| !doomed.contains(id));
        self.likes.retain(|_, like| !doomed.contains(&like.tweet_id));
    }

    fn check_like(&self, pair: NewLike, except: Option<LikeId>) -> Result<(), RepositoryError> {
        self.ensure_user(pair.user_id, "likes_user_id_fkey")?;
        if !self.tweets.contains_key(&pair.tweet_id) {
            return Err(RepositoryError::reference("likes_tweet_id_fkey"));
        }
        let taken = self.likes.values().any(|like| {
            Some(like.id) != except
                && like.user_id == pair.user_id
                && like.tweet_id == pair.tweet_id
        });
        if taken {
            return Err(RepositoryError::duplicate("likes_user_tweet_key"));
        }
        Ok(())
    }

    pub(super) fn find_like_pair(&self, pair: NewLike) -> Option<Like> {
        self.likes
            .values()
            .find(|like| like.user_id == pair.user_id && like.tweet_id == pair.tweet_id)
            .cloned()
    }

    pub(super) fn insert_like(&mut self, pair: NewLike) -> Result<Like, RepositoryError> {
        self.check_like(pair, None)?;
        let id = LikeId::from_store(next_id(&mut self.sequences.likes)?);
        let now = Utc::now();
        let record = Like {
            id,
            user_id: pair.user_id,
            tweet_id: pair.tweet_id,
            created_at: now,
            updated_at: now,
        };
        self.likes.insert(id, record.clone());
        Ok(record)
    }

    pub(super) fn update_like(
        &mut self,
        id: LikeId,
        pair: NewLike,
    ) -> Result<Option<Like>, RepositoryError> {
        if !self.likes.contains_key(&id) {
            return Ok(None);
        }
        self.check_like(pair, Some(id))?;
        let Some(like) = self.likes.get_mut(&id) else {
            return Ok(None);
        };
        like.user_id = pair.user_id;
        like.tweet_id = pair.tweet_id;
        like.updated_at = Utc::now();
        Ok(Some(like.clone()))
    }

    pub(super) fn delete_like(&mut self, id: LikeId) -> Option<Like> {
        self.likes.remove(&id)
    }

    fn check_follow(
        &self,
        pair: NewFollow,
        except: Option<FollowId>,
    ) -> Result<(), RepositoryError> {
        if pair.follower_id() == pair.followee_id() {
            return Err(RepositoryError::constraint("follows_distinct_users"));
        }
        self.ensure_user(pair.follower_id(), "follows_follower_id_fkey")?;
        self.ensure_user(pair.followee_id(), "follows_followee_id_fkey")?;
        let taken = self.follows.values().any(|follow| {
            Some(follow.id) != except
                && follow.follower_id == pair.follower_id()
                && follow.followee_id == pair.followee_id()
        });
        if taken {
            return Err(RepositoryError::duplicate("follows_pair_key"));
        }
        Ok(())
    }

    pub(super) fn find_follow_pair(&self, pair: NewFollow) -> Option<Follow> {
        self.follows
            .values()
            .find(|follow| {
                follow.follower_id == pair.follower_id() && follow.followee_id == pair.followee_id()
            })
            .cloned()
    }

    pub(super) fn insert_follow(&mut self, pair: NewFollow) -> Result<Follow, RepositoryError> {
        self.check_follow(pair, None)?;
        let id = FollowId::from_store(next_id(&mut self.sequences.follows)?);
        let now = Utc::now();
        let record = Follow {
            id,
            follower_id: pair.follower_id(),
            followee_id: pair.followee_id(),
            created_at: now,
            updated_at: now,
        };
        self.follows.insert(id, record.clone());
        Ok(record)
    }

    pub(super) fn update_follow(
        &mut self,
        id: FollowId,
        pair: NewFollow,
    ) -> Result<Option<Follow>, RepositoryError> {
        if !self.follows.contains_key(&id) {
            return Ok(None);
        }
        self.check_follow(pair, Some(id))?;
        let Some(follow) = self.follows.get_mut(&id) else {
            return Ok(None);
        };
        follow.follower_id = pair.follower_id();
        follow.followee_id = pair.followee_id();
        follow.updated_at = Utc::now();
        Ok(Some(follow.clone()))
    }

    pub(super) fn delete_follow(&mut self, id: FollowId) -> Option<Follow> {
        self.follows.remove(&id)
    }
}
