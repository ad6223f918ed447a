//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON payloads into domain values, call the driving
//! ports held in [`state::HttpState`] and wrap results in the success
//! envelope. Failures become the failure envelope via [`error`].

pub mod auth;
pub mod envelope;
pub mod error;
pub mod follows;
pub mod health;
pub mod likes;
pub mod routes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tweets;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
