//! Follow API handlers.
//!
//! ```text
//! GET    /api/v1/follows
//! POST   /api/v1/follows {"followeeId":5}
//! GET    /api/v1/follows/{id}
//! PUT    /api/v1/follows/{id} {"followeeId":6}
//! DELETE /api/v1/follows/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FollowChanges, FollowId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{FailureSchema, FollowSchema, FollowViewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_id, optional_field_id, parse_id, parse_raw_id};

/// Body for `POST /api/v1/follows`; the caller is the follower.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFollowRequest {
    #[schema(example = 5)]
    pub followee_id: i64,
}

/// Body for `PUT /api/v1/follows/{id}`; omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFollowRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followee_id: Option<i64>,
}

/// List follows with both users.
#[utoipa::path(
    get,
    path = "/api/v1/follows",
    responses(
        (status = 200, description = "Follows", body = [FollowViewSchema]),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["follows"],
    operation_id = "listFollows"
)]
#[get("/follows")]
pub async fn list_follows(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let follows = state.follows_query.list().await?;
    Ok(envelope::ok("follows listed", follows))
}

/// Fetch one follow.
#[utoipa::path(
    get,
    path = "/api/v1/follows/{id}",
    params(("id" = i64, Path, description = "Follow identifier")),
    responses(
        (status = 200, description = "Follow", body = FollowSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["follows"],
    operation_id = "getFollow"
)]
#[get("/follows/{id}")]
pub async fn get_follow(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw_id = parse_raw_id(&path.into_inner())?;
    let follow = state.follows_query.get(raw_id).await?;
    Ok(envelope::ok("follow found", follow))
}

/// Follow another user as the caller.
#[utoipa::path(
    post,
    path = "/api/v1/follows",
    request_body = CreateFollowRequest,
    responses(
        (status = 201, description = "Follow created", body = FollowSchema),
        (status = 400, description = "Invalid request or self-follow", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "User not found", body = FailureSchema),
        (status = 409, description = "Already following", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["follows"],
    operation_id = "createFollow"
)]
#[post("/follows")]
pub async fn create_follow(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateFollowRequest>,
) -> ApiResult<HttpResponse> {
    let followee: UserId = field_id("followeeId", payload.followee_id)?;
    let follow = state.follows.create(caller.id(), followee).await?;
    Ok(envelope::created("follow created", follow))
}

/// Reassign a follow's follower or followee.
#[utoipa::path(
    put,
    path = "/api/v1/follows/{id}",
    params(("id" = i32, Path, description = "Follow identifier")),
    request_body = UpdateFollowRequest,
    responses(
        (status = 201, description = "Follow updated", body = FollowSchema),
        (status = 400, description = "Invalid request or self-follow", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 409, description = "Already following", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["follows"],
    operation_id = "updateFollow"
)]
#[put("/follows/{id}")]
pub async fn update_follow(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateFollowRequest>,
) -> ApiResult<HttpResponse> {
    let id: FollowId = parse_id(&path.into_inner())?;
    let UpdateFollowRequest {
        follower_id,
        followee_id,
    } = payload.into_inner();
    let changes = FollowChanges {
        follower_id: optional_field_id("followerId", follower_id)?,
        followee_id: optional_field_id("followeeId", followee_id)?,
    };
    let follow = state.follows.update(id, changes).await?;
    Ok(envelope::created("follow updated", follow))
}

/// Remove a follow.
#[utoipa::path(
    delete,
    path = "/api/v1/follows/{id}",
    params(("id" = i32, Path, description = "Follow identifier")),
    responses(
        (status = 201, description = "Follow deleted", body = FollowSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["follows"],
    operation_id = "deleteFollow"
)]
#[delete("/follows/{id}")]
pub async fn delete_follow(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: FollowId = parse_id(&path.into_inner())?;
    let follow = state.follows.delete(id).await?;
    Ok(envelope::created("follow deleted", follow))
}
