//! Like API handlers.
//!
//! ```text
//! GET    /api/v1/likes
//! POST   /api/v1/likes {"tweetId":3}
//! GET    /api/v1/likes/{id}
//! PUT    /api/v1/likes/{id} {"userId":2,"tweetId":5}
//! DELETE /api/v1/likes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LikeChanges, LikeId, NewLike, TweetId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{FailureSchema, LikeSchema, LikeViewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_id, optional_field_id, parse_id, parse_raw_id};

/// Body for `POST /api/v1/likes`; the caller is the owner.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLikeRequest {
    #[schema(example = 3)]
    pub tweet_id: i64,
}

/// Body for `PUT /api/v1/likes/{id}`; omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLikeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<i64>,
}

/// List likes with their user and tweet.
#[utoipa::path(
    get,
    path = "/api/v1/likes",
    responses(
        (status = 200, description = "Likes", body = [LikeViewSchema]),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["likes"],
    operation_id = "listLikes"
)]
#[get("/likes")]
pub async fn list_likes(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let likes = state.likes_query.list().await?;
    Ok(envelope::ok("likes listed", likes))
}

/// Fetch one like.
#[utoipa::path(
    get,
    path = "/api/v1/likes/{id}",
    params(("id" = i64, Path, description = "Like identifier")),
    responses(
        (status = 200, description = "Like", body = LikeSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["likes"],
    operation_id = "getLike"
)]
#[get("/likes/{id}")]
pub async fn get_like(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw_id = parse_raw_id(&path.into_inner())?;
    let like = state.likes_query.get(raw_id).await?;
    Ok(envelope::ok("like found", like))
}

/// Like a tweet as the caller.
#[utoipa::path(
    post,
    path = "/api/v1/likes",
    request_body = CreateLikeRequest,
    responses(
        (status = 201, description = "Like created", body = LikeSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Tweet not found", body = FailureSchema),
        (status = 409, description = "Tweet already liked", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["likes"],
    operation_id = "createLike"
)]
#[post("/likes")]
pub async fn create_like(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateLikeRequest>,
) -> ApiResult<HttpResponse> {
    let tweet_id: TweetId = field_id("tweetId", payload.tweet_id)?;
    let like = state
        .likes
        .create(NewLike {
            user_id: caller.id(),
            tweet_id,
        })
        .await?;
    Ok(envelope::created("like created", like))
}

/// Reassign a like's user or tweet.
#[utoipa::path(
    put,
    path = "/api/v1/likes/{id}",
    params(("id" = i32, Path, description = "Like identifier")),
    request_body = UpdateLikeRequest,
    responses(
        (status = 201, description = "Like updated", body = LikeSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 409, description = "Pair already liked", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["likes"],
    operation_id = "updateLike"
)]
#[put("/likes/{id}")]
pub async fn update_like(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateLikeRequest>,
) -> ApiResult<HttpResponse> {
    let id: LikeId = parse_id(&path.into_inner())?;
    let UpdateLikeRequest { user_id, tweet_id } = payload.into_inner();
    let changes = LikeChanges {
        user_id: optional_field_id::<UserId>("userId", user_id)?,
        tweet_id: optional_field_id::<TweetId>("tweetId", tweet_id)?,
    };
    let like = state.likes.update(id, changes).await?;
    Ok(envelope::created("like updated", like))
}

/// Remove a like.
#[utoipa::path(
    delete,
    path = "/api/v1/likes/{id}",
    params(("id" = i32, Path, description = "Like identifier")),
    responses(
        (status = 201, description = "Like deleted", body = LikeSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["likes"],
    operation_id = "deleteLike"
)]
#[delete("/likes/{id}")]
pub async fn delete_like(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: LikeId = parse_id(&path.into_inner())?;
    let like = state.likes.delete(id).await?;
    Ok(envelope::created("like deleted", like))
}
