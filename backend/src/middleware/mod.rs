//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as trace correlation, request logging and cross-origin access.

pub mod cors;
pub mod trace;

pub use cors::cors;
pub use trace::Trace;
