//! Tweet API handlers.
//!
//! ```text
//! GET    /api/v1/tweets
//! POST   /api/v1/tweets {"content":"hello"}
//! PUT    /api/v1/tweets/{id} {"content":"edited","kind":"original"}
//! DELETE /api/v1/tweets/{id}
//! POST   /api/v1/tweets/{id}/reply {"content":"agreed"}
//! GET    /api/v1/feed
//! GET    /api/v1/users/{id}/tweets
//! ```
//!
//! Every route needs a bearer token; new tweets and replies are authored by
//! the caller.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{TweetChanges, TweetContent, TweetId, TweetKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{FailureSchema, TweetSchema, TweetThreadSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{content_error, kind_error, parse_id, parse_raw_id};

/// Body for posting a tweet or a reply.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TweetRequest {
    #[schema(example = "hello world")]
    pub content: String,
}

/// Body for `PUT /api/v1/tweets/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTweetRequest {
    pub content: String,
    /// `original` (alias `tweet`) or `reply`.
    #[schema(example = "original")]
    pub kind: String,
}

impl TryFrom<UpdateTweetRequest> for TweetChanges {
    type Error = crate::domain::Error;

    fn try_from(value: UpdateTweetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            content: TweetContent::new(&value.content).map_err(content_error)?,
            kind: value.kind.parse::<TweetKind>().map_err(kind_error)?,
        })
    }
}

/// List original tweets with authors, replies and likes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/tweets",
    responses(
        (status = 200, description = "Tweet threads", body = [TweetThreadSchema]),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "listTweets"
)]
#[get("/tweets")]
pub async fn list_tweets(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let threads = state.tweets_query.list_all().await?;
    Ok(envelope::ok("tweets listed", threads))
}

/// Post an original tweet as the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tweets",
    request_body = TweetRequest,
    responses(
        (status = 201, description = "Tweet created", body = TweetSchema),
        (status = 400, description = "Blank content", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "createTweet"
)]
#[post("/tweets")]
pub async fn create_tweet(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<TweetRequest>,
) -> ApiResult<HttpResponse> {
    let content = TweetContent::new(&payload.content).map_err(content_error)?;
    let tweet = state.tweets.create(caller.id(), content).await?;
    Ok(envelope::created("tweet created", tweet))
}

/// Replace a tweet's content and kind.
#[utoipa::path(
    put,
    path = "/api/v1/tweets/{id}",
    params(("id" = i32, Path, description = "Tweet identifier")),
    request_body = UpdateTweetRequest,
    responses(
        (status = 201, description = "Tweet updated", body = TweetSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "updateTweet"
)]
#[put("/tweets/{id}")]
pub async fn update_tweet(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateTweetRequest>,
) -> ApiResult<HttpResponse> {
    let id: TweetId = parse_id(&path.into_inner())?;
    let changes = TweetChanges::try_from(payload.into_inner())?;
    let tweet = state.tweets.update(id, changes).await?;
    Ok(envelope::created("tweet updated", tweet))
}

/// Delete a tweet with its replies and likes.
#[utoipa::path(
    delete,
    path = "/api/v1/tweets/{id}",
    params(("id" = i32, Path, description = "Tweet identifier")),
    responses(
        (status = 201, description = "Tweet deleted", body = TweetSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "deleteTweet"
)]
#[delete("/tweets/{id}")]
pub async fn delete_tweet(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: TweetId = parse_id(&path.into_inner())?;
    let tweet = state.tweets.delete(id).await?;
    Ok(envelope::created("tweet deleted", tweet))
}

/// Reply to a tweet as the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tweets/{id}/reply",
    params(("id" = i32, Path, description = "Parent tweet identifier")),
    request_body = TweetRequest,
    responses(
        (status = 201, description = "Reply created", body = TweetSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Parent tweet not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "replyToTweet"
)]
#[post("/tweets/{id}/reply")]
pub async fn reply_to_tweet(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TweetRequest>,
) -> ApiResult<HttpResponse> {
    let parent: TweetId = parse_id(&path.into_inner())?;
    let content = TweetContent::new(&payload.content).map_err(content_error)?;
    let reply = state.tweets.reply(parent, caller.id(), content).await?;
    Ok(envelope::created("reply created", reply))
}

/// Original tweets of the caller and of everyone the caller follows.
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    responses(
        (status = 200, description = "Feed, newest first", body = [TweetThreadSchema]),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "feed"
)]
#[get("/feed")]
pub async fn feed(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let threads = state.tweets_query.feed(caller.id()).await?;
    Ok(envelope::ok("feed listed", threads))
}

/// Every tweet of one user.
///
/// Unknown users, non-positive ids and users without tweets all report 404.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/tweets",
    params(("id" = i64, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Tweet threads", body = [TweetThreadSchema]),
        (status = 400, description = "Id is not a number", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "No tweets for this user", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["tweets"],
    operation_id = "listUserTweets"
)]
#[get("/users/{id}/tweets")]
pub async fn list_user_tweets(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw_user_id = parse_raw_id(&path.into_inner())?;
    let threads = state.tweets_query.list_by_user(raw_user_id).await?;
    Ok(envelope::ok("tweets listed", threads))
}

#[cfg(test)]
#[path = "tweets_tests.rs"]
mod tests;
