//! Success envelope shared by every endpoint.

use actix_web::HttpResponse;
use serde::Serialize;

/// `{ "success": true, "message": ..., "data": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    message: &'static str,
    data: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap `data` with a human-readable message.
    pub const fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// `200 OK` carrying an envelope.
pub fn ok<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::new(message, data))
}

/// `201 Created` carrying an envelope; used for every successful mutation.
pub fn created<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    HttpResponse::Created().json(Envelope::new(message, data))
}
