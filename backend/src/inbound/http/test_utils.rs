//! Test-only helpers for HTTP handler tests.
//!
//! Handlers are exercised against mocked driving ports so each test states
//! exactly which use-case it expects the adapter to call.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MockFollowsCommand, MockFollowsQuery, MockLikesCommand, MockLikesQuery, MockLoginService,
    MockTokenService, MockTweetsCommand, MockTweetsQuery, MockUsersCommand, MockUsersQuery,
    TokenError,
};
use crate::domain::{
    Follow, FollowId, Like, LikeId, Tweet, TweetId, TweetKind, User, UserId, UserSummary,
};

use super::state::{HttpState, HttpStatePorts};

/// Token accepted by [`MockPorts::authenticating_as`].
pub(crate) const VALID_TOKEN: &str = "valid-token";

/// Mocked driving ports; set expectations then call [`MockPorts::into_state`].
#[derive(Default)]
pub(crate) struct MockPorts {
    pub users: MockUsersCommand,
    pub users_query: MockUsersQuery,
    pub login: MockLoginService,
    pub tweets: MockTweetsCommand,
    pub tweets_query: MockTweetsQuery,
    pub likes: MockLikesCommand,
    pub likes_query: MockLikesQuery,
    pub follows: MockFollowsCommand,
    pub follows_query: MockFollowsQuery,
    pub tokens: MockTokenService,
}

impl MockPorts {
    /// Accept [`VALID_TOKEN`] as user `raw_id` and reject anything else.
    pub(crate) fn authenticating_as(mut self, raw_id: i64) -> Self {
        let caller = uid(raw_id);
        self.tokens.expect_verify().returning(move |token| {
            if token == VALID_TOKEN {
                Ok(caller)
            } else {
                Err(TokenError::invalid("signature mismatch"))
            }
        });
        self
    }

    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            login: Arc::new(self.login),
            tweets: Arc::new(self.tweets),
            tweets_query: Arc::new(self.tweets_query),
            likes: Arc::new(self.likes),
            likes_query: Arc::new(self.likes_query),
            follows: Arc::new(self.follows),
            follows_query: Arc::new(self.follows_query),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// Application exposing the full `/api/v1` route table over `ports`.
pub(crate) fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .service(web::scope("/api/v1").configure(super::routes::configure))
}

/// `Authorization` header carrying [`VALID_TOKEN`].
pub(crate) fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {VALID_TOKEN}"))
}

pub(crate) fn uid(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(crate) fn tid(raw: i64) -> TweetId {
    TweetId::new(raw).expect("valid tweet id")
}

pub(crate) fn instant() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

pub(crate) fn user(raw_id: i64, username: &str) -> User {
    User {
        id: uid(raw_id),
        name: format!("{username} name"),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        created_at: instant(),
        updated_at: instant(),
    }
}

pub(crate) fn summary(raw_id: i64, username: &str) -> UserSummary {
    user(raw_id, username).summary()
}

pub(crate) fn tweet(raw_id: i64, author: i64, reply_to: Option<i64>) -> Tweet {
    Tweet {
        id: tid(raw_id),
        content: format!("tweet {raw_id}"),
        kind: if reply_to.is_some() {
            TweetKind::Reply
        } else {
            TweetKind::Original
        },
        author_id: uid(author),
        reply_to_id: reply_to.map(tid),
        created_at: instant(),
    }
}

pub(crate) fn like(raw_id: i64, user_id: i64, tweet_id: i64) -> Like {
    Like {
        id: LikeId::new(raw_id).expect("valid like id"),
        user_id: uid(user_id),
        tweet_id: tid(tweet_id),
        created_at: instant(),
        updated_at: instant(),
    }
}

pub(crate) fn follow(raw_id: i64, follower: i64, followee: i64) -> Follow {
    Follow {
        id: FollowId::new(raw_id).expect("valid follow id"),
        follower_id: uid(follower),
        followee_id: uid(followee),
        created_at: instant(),
        updated_at: instant(),
    }
}
