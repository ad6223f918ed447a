//! Likes: one user endorsing one tweet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LikeId, TweetId, UserId, UserSummary};

/// Stored like. At most one exists per `(user_id, tweet_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    /// Identifier.
    pub id: LikeId,
    /// User who liked.
    pub user_id: UserId,
    /// Liked tweet.
    pub tweet_id: TweetId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert payload and full pair for a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLike {
    /// User who likes.
    pub user_id: UserId,
    /// Tweet being liked.
    pub tweet_id: TweetId,
}

/// Partial reassignment of a like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeChanges {
    /// New owner.
    pub user_id: Option<UserId>,
    /// New tweet.
    pub tweet_id: Option<TweetId>,
}

impl LikeChanges {
    /// Whether no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.tweet_id.is_none()
    }

    /// Overlay the supplied fields on an existing like.
    #[must_use]
    pub fn apply_to(self, like: &Like) -> NewLike {
        NewLike {
            user_id: self.user_id.unwrap_or(like.user_id),
            tweet_id: self.tweet_id.unwrap_or(like.tweet_id),
        }
    }
}

/// Liked tweet as shown in like listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikedTweet {
    /// Tweet identifier.
    pub id: TweetId,
    /// Tweet text.
    pub content: String,
}

/// A like with the user and tweet it links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeView {
    /// The like.
    #[serde(flatten)]
    pub like: Like,
    /// User who liked.
    pub user: UserSummary,
    /// Liked tweet.
    pub tweet: LikedTweet,
}
