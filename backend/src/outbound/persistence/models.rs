//! Diesel row types. Persistence-internal; the domain sees only the
//! converted records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Follow, FollowId, Like, LikeId, LikedTweet, NewTweet, PasswordHash, StoredUser, Tweet,
    TweetChanges, TweetId, TweetKind, User, UserId, UserSummary,
};

use super::schema::{follows, likes, tweets, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_stored(self) -> StoredUser {
        StoredUser {
            password_hash: PasswordHash::new(self.password_hash.clone()),
            user: self.into(),
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_store(row.id),
            name: row.name,
            email: row.email,
            username: row.username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserSummaryRow {
    pub id: i32,
    pub name: String,
    pub username: String,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        Self {
            id: UserId::from_store(row.id),
            name: row.name,
            username: row.username,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tweets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TweetRow {
    pub id: i32,
    pub content: String,
    pub kind: String,
    pub author_id: i32,
    pub reply_to_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TweetRow> for Tweet {
    type Error = RepositoryError;

    fn try_from(row: TweetRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<TweetKind>()
            .map_err(|err| RepositoryError::query(err.to_string()))?;
        Ok(Self {
            id: TweetId::from_store(row.id),
            content: row.content,
            kind,
            author_id: UserId::from_store(row.author_id),
            reply_to_id: row.reply_to_id.map(TweetId::from_store),
            created_at: row.created_at,
        })
    }
}

pub(crate) fn tweets_from_rows(rows: Vec<TweetRow>) -> Result<Vec<Tweet>, RepositoryError> {
    rows.into_iter().map(Tweet::try_from).collect()
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tweets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LikedTweetRow {
    pub id: i32,
    pub content: String,
}

impl From<LikedTweetRow> for LikedTweet {
    fn from(row: LikedTweetRow) -> Self {
        Self {
            id: TweetId::from_store(row.id),
            content: row.content,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tweets)]
pub(crate) struct NewTweetRow<'a> {
    pub content: &'a str,
    pub kind: &'static str,
    pub author_id: i32,
    pub reply_to_id: Option<i32>,
}

impl<'a> From<&'a NewTweet> for NewTweetRow<'a> {
    fn from(tweet: &'a NewTweet) -> Self {
        Self {
            content: &tweet.content,
            kind: tweet.kind.as_str(),
            author_id: tweet.author_id.get(),
            reply_to_id: tweet.reply_to_id.map(TweetId::get),
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = tweets)]
pub(crate) struct TweetChangeset<'a> {
    pub content: &'a str,
    pub kind: &'static str,
}

impl<'a> From<&'a TweetChanges> for TweetChangeset<'a> {
    fn from(changes: &'a TweetChanges) -> Self {
        Self {
            content: changes.content.as_str(),
            kind: changes.kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = likes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LikeRow {
    pub id: i32,
    pub user_id: i32,
    pub tweet_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LikeRow> for Like {
    fn from(row: LikeRow) -> Self {
        Self {
            id: LikeId::from_store(row.id),
            user_id: UserId::from_store(row.user_id),
            tweet_id: TweetId::from_store(row.tweet_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub user_id: i32,
    pub tweet_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = follows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FollowRow {
    pub id: i32,
    pub follower_id: i32,
    pub followee_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FollowRow> for Follow {
    fn from(row: FollowRow) -> Self {
        Self {
            id: FollowId::from_store(row.id),
            follower_id: UserId::from_store(row.follower_id),
            followee_id: UserId::from_store(row.followee_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow {
    pub follower_id: i32,
    pub followee_id: i32,
}
