//! Account API handlers.
//!
//! ```text
//! POST   /api/v1/sign-up {"name":"Ada","email":"ada@example.com","username":"ada","password":"pw"}
//! POST   /api/v1/login {"identifier":"ada","password":"pw"}
//! GET    /api/v1/users?includeRelations=true
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Email, Error, LoginCredentials, Password, PersonName, Registration, UserId, UserUpdate,
    Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    FailureSchema, LoginOutcomeSchema, UserProfileSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_validation_error, parse_id, user_validation_error};

/// Sign-up request body for `POST /api/v1/sign-up`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
    pub password: String,
}

impl TryFrom<SignUpRequest> for Registration {
    type Error = Error;

    fn try_from(value: SignUpRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PersonName::new(&value.name).map_err(user_validation_error)?,
            email: Email::new(&value.email).map_err(user_validation_error)?,
            username: Username::new(&value.username).map_err(user_validation_error)?,
            password: Password::new(&value.password).map_err(login_validation_error)?,
        })
    }
}

/// Login request body for `POST /api/v1/login`.
///
/// `identifier` matches either the email or the username.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada")]
    pub identifier: String,
    pub password: String,
}

/// Partial account update for `PUT /api/v1/users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value
                .name
                .map(PersonName::new)
                .transpose()
                .map_err(user_validation_error)?,
            email: value
                .email
                .map(Email::new)
                .transpose()
                .map_err(user_validation_error)?,
            username: value
                .username
                .map(Username::new)
                .transpose()
                .map_err(user_validation_error)?,
            password: value
                .password
                .as_deref()
                .map(Password::new)
                .transpose()
                .map_err(login_validation_error)?,
        })
    }
}

/// Query parameters for `GET /api/v1/users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Expand each user's tweets, likes, followings and followers.
    #[serde(default)]
    pub include_relations: bool,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created; `data` holds the user", body = UserSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 409, description = "Email or username already in use", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.users.register(registration).await?;
    Ok(envelope::created("user registered", user))
}

/// Exchange credentials for a bearer token.
///
/// Unknown accounts fail with 401 and wrong passwords with 402, so clients
/// can tell the two apart.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success; `data` holds the token and user", body = LoginOutcomeSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 401, description = "Unknown account", body = FailureSchema),
        (status = 402, description = "Wrong password", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest {
        identifier,
        password,
    } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&identifier, &password).map_err(login_validation_error)?;
    let outcome = state.login.login(credentials).await?;
    Ok(envelope::ok("login successful", outcome))
}

/// List accounts.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users; relations appear only when requested", body = [UserProfileSchema]),
        (status = 400, description = "Invalid query", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<HttpResponse> {
    let profiles = state.users_query.list(query.include_relations).await?;
    Ok(envelope::ok("users listed", profiles))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path.into_inner())?;
    let user = state.users_query.get(id).await?;
    Ok(envelope::ok("user found", user))
}

/// Update an account.
///
/// At least one of `name`, `email`, `username` or `password` must be given.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 201, description = "User updated", body = UserSchema),
        (status = 400, description = "Invalid request", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 409, description = "Email or username already in use", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path.into_inner())?;
    let update = UserUpdate::try_from(payload.into_inner())?;
    let user = state.users.update(id, update).await?;
    Ok(envelope::created("user updated", user))
}

/// Delete an account together with its tweets, likes and follows.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 201, description = "User deleted", body = UserSchema),
        (status = 400, description = "Invalid id", body = FailureSchema),
        (status = 401, description = "Unauthorised", body = FailureSchema),
        (status = 404, description = "Not found", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path.into_inner())?;
    let user = state.users.delete(id).await?;
    Ok(envelope::created("user deleted", user))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
