//! Cross-origin policy for browser clients.

use actix_cors::Cors;

use crate::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware.
///
/// With no configured origins (or a `*` entry) any origin is admitted and
/// echoed back. Otherwise only the listed origins receive CORS headers.
#[must_use]
pub fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |policy, origin| policy.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .expose_headers([TRACE_ID_HEADER])
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
