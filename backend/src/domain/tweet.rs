//! Tweets, replies and their enriched read models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Like, TweetId, UserId, UserSummary};

/// Discriminator between an original post and a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TweetKind {
    /// Top-level post. Accepts the legacy spelling `"tweet"` on input.
    #[serde(alias = "tweet")]
    Original,
    /// Answer to another tweet.
    Reply,
}

impl TweetKind {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Reply => "reply",
        }
    }
}

/// Error for unknown kind strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tweet kind `{0}`")]
pub struct UnknownTweetKind(pub String);

impl FromStr for TweetKind {
    type Err = UnknownTweetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" | "tweet" => Ok(Self::Original),
            "reply" => Ok(Self::Reply),
            other => Err(UnknownTweetKind(other.to_owned())),
        }
    }
}

/// Validation failure for tweet text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("content must not be empty")]
pub struct EmptyContent;

/// Non-empty tweet text, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetContent(String);

impl TweetContent {
    /// Trim and validate tweet text.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyContent> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyContent);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Stored tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    /// Identifier.
    pub id: TweetId,
    /// Text.
    pub content: String,
    /// Original or reply.
    pub kind: TweetKind,
    /// Author.
    pub author_id: UserId,
    /// Parent tweet; set exactly when `kind` is [`TweetKind::Reply`].
    pub reply_to_id: Option<TweetId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the tweet repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    /// Text.
    pub content: String,
    /// Original or reply.
    pub kind: TweetKind,
    /// Author.
    pub author_id: UserId,
    /// Parent when replying.
    pub reply_to_id: Option<TweetId>,
}

impl NewTweet {
    /// A top-level post.
    #[must_use]
    pub fn original(content: TweetContent, author_id: UserId) -> Self {
        Self {
            content: content.into_inner(),
            kind: TweetKind::Original,
            author_id,
            reply_to_id: None,
        }
    }

    /// A reply to `parent`.
    #[must_use]
    pub fn reply(content: TweetContent, author_id: UserId, parent: TweetId) -> Self {
        Self {
            content: content.into_inner(),
            kind: TweetKind::Reply,
            author_id,
            reply_to_id: Some(parent),
        }
    }
}

/// Full replacement of a tweet's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetChanges {
    /// New text.
    pub content: TweetContent,
    /// New kind.
    pub kind: TweetKind,
}

/// Selection criteria for enriched tweet listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetFilter {
    /// Restrict to one kind.
    pub kind: Option<TweetKind>,
    /// Restrict to these authors.
    pub authors: Option<Vec<UserId>>,
}

impl TweetFilter {
    /// Every original post.
    #[must_use]
    pub const fn originals() -> Self {
        Self {
            kind: Some(TweetKind::Original),
            authors: None,
        }
    }

    /// Every tweet of one author, any kind.
    #[must_use]
    pub fn by_author(author: UserId) -> Self {
        Self {
            kind: None,
            authors: Some(vec![author]),
        }
    }

    /// Original posts of a set of authors.
    #[must_use]
    pub const fn originals_by(authors: Vec<UserId>) -> Self {
        Self {
            kind: Some(TweetKind::Original),
            authors: Some(authors),
        }
    }
}

/// A reply together with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReply {
    /// The reply.
    #[serde(flatten)]
    pub tweet: Tweet,
    /// Reply author.
    pub author: UserSummary,
}

/// A tweet enriched with author, replies and likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetThread {
    /// The tweet.
    #[serde(flatten)]
    pub tweet: Tweet,
    /// Tweet author.
    pub author: UserSummary,
    /// Number of direct replies.
    pub reply_count: u64,
    /// Number of likes.
    pub like_count: u64,
    /// Direct replies, oldest first.
    pub replies: Vec<ThreadReply>,
    /// Likes on the tweet.
    pub likes: Vec<Like>,
}
