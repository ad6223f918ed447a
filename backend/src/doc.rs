//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint of the inbound layer
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] plus the request bodies
//! - **Security**: bearer token authentication scheme
//!
//! The generated document is served by Swagger UI at `/docs` and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::follows::{CreateFollowRequest, UpdateFollowRequest};
use crate::inbound::http::likes::{CreateLikeRequest, UpdateLikeRequest};
use crate::inbound::http::schemas::{
    AuthoredTweetSchema, ErrorCodeSchema, FailureSchema, FollowSchema, FollowViewSchema,
    GivenLikeSchema, LikeSchema, LikeViewSchema, LikedTweetSchema, LoginOutcomeSchema,
    SuccessSchema, ThreadReplySchema, TweetKindSchema, TweetSchema, TweetThreadSchema,
    UserProfileSchema, UserSchema, UserSummarySchema,
};
use crate::inbound::http::tweets::{TweetRequest, UpdateTweetRequest};
use crate::inbound::http::users::{LoginRequest, SignUpRequest, UpdateUserRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme referenced by authenticated operations.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
///
/// Every documented response body is the `data` member of the success
/// envelope ([`SuccessSchema`]) or the failure envelope itself.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Chirp API",
        description = "Users, tweets, likes and follows behind bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::tweets::list_tweets,
        crate::inbound::http::tweets::create_tweet,
        crate::inbound::http::tweets::update_tweet,
        crate::inbound::http::tweets::delete_tweet,
        crate::inbound::http::tweets::reply_to_tweet,
        crate::inbound::http::tweets::feed,
        crate::inbound::http::tweets::list_user_tweets,
        crate::inbound::http::likes::list_likes,
        crate::inbound::http::likes::get_like,
        crate::inbound::http::likes::create_like,
        crate::inbound::http::likes::update_like,
        crate::inbound::http::likes::delete_like,
        crate::inbound::http::follows::list_follows,
        crate::inbound::http::follows::get_follow,
        crate::inbound::http::follows::create_follow,
        crate::inbound::http::follows::update_follow,
        crate::inbound::http::follows::delete_follow,
        crate::inbound::http::health::welcome,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SuccessSchema,
        FailureSchema,
        ErrorCodeSchema,
        UserSchema,
        UserSummarySchema,
        UserProfileSchema,
        AuthoredTweetSchema,
        GivenLikeSchema,
        LoginOutcomeSchema,
        TweetKindSchema,
        TweetSchema,
        ThreadReplySchema,
        TweetThreadSchema,
        LikeSchema,
        LikedTweetSchema,
        LikeViewSchema,
        FollowSchema,
        FollowViewSchema,
        SignUpRequest,
        LoginRequest,
        UpdateUserRequest,
        TweetRequest,
        UpdateTweetRequest,
        CreateLikeRequest,
        UpdateLikeRequest,
        CreateFollowRequest,
        UpdateFollowRequest,
    )),
    tags(
        (name = "users", description = "Accounts and login"),
        (name = "tweets", description = "Tweets, replies and the feed"),
        (name = "likes", description = "Likes on tweets"),
        (name = "follows", description = "Follow relationships"),
        (name = "health", description = "Welcome route and health probes")
    )
)]
pub struct ApiDoc;
