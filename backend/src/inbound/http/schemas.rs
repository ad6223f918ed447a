//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON shape of their domain counterparts but
//! live in the inbound adapter layer where framework concerns belong.
#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in failure envelopes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation (400).
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication is missing or invalid, or the account is unknown (401).
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The password does not match the account (402).
    #[schema(rename = "invalid_credentials")]
    InvalidCredentials,
    /// The requested resource does not exist (404).
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state (409).
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server (500).
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Body of every failed response.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct FailureSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "user 7 not found")]
    message: String,
    /// Supplementary diagnostic text.
    detail: Option<String>,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// Body of every successful response; `data` holds the documented payload.
#[derive(ToSchema)]
pub struct SuccessSchema {
    /// Always `true`.
    #[schema(example = true)]
    success: bool,
    /// Human-readable message.
    #[schema(example = "user registered")]
    message: String,
    /// Entity or list returned by the operation.
    #[schema(value_type = Object)]
    data: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "ada")]
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::UserSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserSummary)]
pub struct UserSummarySchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada")]
    username: String,
}

/// OpenAPI schema for [`crate::domain::AuthoredTweet`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AuthoredTweet, rename_all = "camelCase")]
pub struct AuthoredTweetSchema {
    id: i32,
    content: String,
    created_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::GivenLike`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GivenLike, rename_all = "camelCase")]
pub struct GivenLikeSchema {
    id: i32,
    tweet_id: i32,
    created_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::UserProfile`].
///
/// Relation arrays are present only when `includeRelations=true`.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile, rename_all = "camelCase")]
pub struct UserProfileSchema {
    id: i32,
    name: String,
    email: String,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tweets: Option<Vec<AuthoredTweetSchema>>,
    likes: Option<Vec<GivenLikeSchema>>,
    following: Option<Vec<UserSummarySchema>>,
    followers: Option<Vec<UserSummarySchema>>,
}

/// OpenAPI schema for [`crate::domain::LoginOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LoginOutcome)]
pub struct LoginOutcomeSchema {
    /// Bearer token for authenticated routes.
    token: String,
    user: UserSchema,
}

/// OpenAPI schema for [`crate::domain::TweetKind`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TweetKind)]
pub enum TweetKindSchema {
    /// A top-level post. `tweet` is accepted as an alias on input.
    #[schema(rename = "original")]
    Original,
    /// An answer to another tweet.
    #[schema(rename = "reply")]
    Reply,
}

/// OpenAPI schema for [`crate::domain::Tweet`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Tweet, rename_all = "camelCase")]
pub struct TweetSchema {
    id: i32,
    content: String,
    kind: TweetKindSchema,
    author_id: i32,
    reply_to_id: Option<i32>,
    created_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::ThreadReply`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ThreadReply, rename_all = "camelCase")]
pub struct ThreadReplySchema {
    id: i32,
    content: String,
    kind: TweetKindSchema,
    author_id: i32,
    reply_to_id: Option<i32>,
    created_at: DateTime<Utc>,
    author: UserSummarySchema,
}

/// OpenAPI schema for [`crate::domain::Like`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Like, rename_all = "camelCase")]
pub struct LikeSchema {
    id: i32,
    user_id: i32,
    tweet_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::TweetThread`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TweetThread, rename_all = "camelCase")]
pub struct TweetThreadSchema {
    id: i32,
    content: String,
    kind: TweetKindSchema,
    author_id: i32,
    reply_to_id: Option<i32>,
    created_at: DateTime<Utc>,
    author: UserSummarySchema,
    reply_count: u64,
    like_count: u64,
    replies: Vec<ThreadReplySchema>,
    likes: Vec<LikeSchema>,
}

/// OpenAPI schema for [`crate::domain::LikedTweet`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LikedTweet)]
pub struct LikedTweetSchema {
    id: i32,
    content: String,
}

/// OpenAPI schema for [`crate::domain::LikeView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LikeView, rename_all = "camelCase")]
pub struct LikeViewSchema {
    id: i32,
    user_id: i32,
    tweet_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user: UserSummarySchema,
    tweet: LikedTweetSchema,
}

/// OpenAPI schema for [`crate::domain::Follow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Follow, rename_all = "camelCase")]
pub struct FollowSchema {
    id: i32,
    follower_id: i32,
    followee_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::FollowView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FollowView, rename_all = "camelCase")]
pub struct FollowViewSchema {
    id: i32,
    follower_id: i32,
    followee_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    follower: UserSummarySchema,
    followee: UserSummarySchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            "invalid_request",
            "unauthorized",
            "invalid_credentials",
            "not_found",
            "conflict",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn failure_schema_uses_camel_case() {
        let schema_json = schema_to_json::<FailureSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn thread_schema_exposes_counts() {
        let schema_json = schema_to_json::<TweetThreadSchema>();
        assert_eq!(TweetThreadSchema::name(), "crate.domain.TweetThread");
        assert!(schema_json.contains("replyCount"));
        assert!(schema_json.contains("likeCount"));
    }

    #[test]
    fn user_schema_has_no_password() {
        let schema_json = schema_to_json::<UserSchema>();
        assert!(schema_json.contains("username"));
        assert!(!schema_json.contains("password"));
    }
}
