//! `TokenService` issuing HS256 JSON Web Tokens.
//!
//! Tokens carry the user id as `sub` and the issue time as `iat`. An `exp`
//! claim is added only when a lifetime is configured; without one a token is
//! valid until the signing secret changes.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{SessionToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// HMAC-SHA256 token signer and verifier.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl JwtTokenService {
    /// Build a service signing with `secret`; `ttl` adds an expiry claim.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub"]);
        validation.validate_exp = ttl.is_some();
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: UserId) -> Result<SessionToken, TokenError> {
        let now = Utc::now().timestamp();
        let exp = self
            .ttl
            .map(|ttl| now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)));
        let claims = Claims {
            sub: user.to_string(),
            iat: now,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        let raw: i64 = data
            .claims
            .sub
            .parse()
            .map_err(|_| TokenError::invalid("subject is not a user id"))?;
        UserId::new(raw).map_err(|err| TokenError::invalid(err.to_string()))
    }
}
