//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path segments and body identifiers are checked here so malformed input is
//! rejected with status 400 before any service runs.

use crate::domain::{
    EmptyContent, Error, IdValidationError, LoginValidationError, UnknownTweetKind,
    UserValidationError,
};

/// Message reported for every unusable path identifier.
pub(crate) const INVALID_ID: &str = "invalid id";

/// Parse a path segment as an integer without checking its sign.
pub(crate) fn parse_raw_id(raw: &str) -> Result<i64, Error> {
    raw.trim().parse::<i64>().map_err(|_| {
        Error::invalid_request(INVALID_ID).with_detail(format!("'{raw}' is not a number"))
    })
}

/// Parse a path segment into a typed identifier.
pub(crate) fn parse_id<T>(raw: &str) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    let value = parse_raw_id(raw)?;
    T::try_from(value)
        .map_err(|err| Error::invalid_request(INVALID_ID).with_detail(err.to_string()))
}

/// Convert a body field into a typed identifier.
pub(crate) fn field_id<T>(field: &'static str, value: i64) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    T::try_from(value).map_err(|err| Error::invalid_request(format!("{field}: {err}")))
}

/// Convert an optional body field into a typed identifier.
pub(crate) fn optional_field_id<T>(
    field: &'static str,
    value: Option<i64>,
) -> Result<Option<T>, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    value.map(|raw| field_id(field, raw)).transpose()
}

pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

pub(crate) fn content_error(err: EmptyContent) -> Error {
    Error::invalid_request(err.to_string())
}

pub(crate) fn kind_error(err: UnknownTweetKind) -> Error {
    Error::invalid_request(err.to_string())
}
