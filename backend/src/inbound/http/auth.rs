//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers that need a caller take an [`AuthenticatedUser`] argument; the
//! extractor runs before the body is read, so a missing or bad token fails
//! with 401 ahead of any service logic.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, UserId};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, taken from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// The caller's user id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .get(..BEARER_PREFIX.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
        .and_then(|_| value.get(BEARER_PREFIX.len()..))
        .map(str::trim)
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let token = bearer_token(req.headers())?;
    state.tokens.verify(token).map(AuthenticatedUser).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized("invalid or expired token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
