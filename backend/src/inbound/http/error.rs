//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the failure envelope and a status
//! code. Internal failures are logged in full and reach clients behind a
//! generic message, with the original text in `detail`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message shown to clients in place of internal failure text.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::InvalidCredentials => StatusCode::PAYMENT_REQUIRED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire shape of every failed response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureEnvelope<'a> {
    success: bool,
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

fn envelope_for(error: &Error) -> FailureEnvelope<'_> {
    let (message, detail) = if matches!(error.code(), ErrorCode::InternalError) {
        (INTERNAL_ERROR_MESSAGE, Some(error.to_string()))
    } else {
        (error.message(), error.detail().map(str::to_owned))
    };
    FailureEnvelope {
        success: false,
        code: error.code(),
        message,
        detail,
        trace_id: error.trace_id(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                error = %self,
                "request failed"
            );
        } else {
            warn!(
                code = ?self.code(),
                status = status.as_u16(),
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                "request rejected"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(envelope_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("request processing failed").with_detail(err.to_string())
    }
}

/// Wrap an extractor failure in the failure envelope with status 400.
pub(crate) fn malformed_input(what: &str, cause: impl std::fmt::Display) -> actix_web::Error {
    Error::invalid_request(format!("malformed {what}"))
        .with_detail(cause.to_string())
        .into()
}
