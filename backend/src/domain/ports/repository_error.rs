//! Failure vocabulary shared by the persistence ports.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { constraint: String } => "duplicate value violates {constraint}",
        /// A referenced row does not exist.
        Reference { constraint: String } => "missing referenced row for {constraint}",
        /// A check constraint rejected the write.
        Constraint { constraint: String } => "write violates {constraint}",
    }
}

/// Translate a repository failure without operation-specific context.
///
/// Services intercept the variants they can describe better (for example a
/// duplicate email) before falling back to this mapping.
pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::internal("repository unavailable").with_detail(message)
        }
        RepositoryError::Query { message } => {
            Error::internal("repository error").with_detail(message)
        }
        RepositoryError::Duplicate { .. } => Error::conflict("duplicate value"),
        RepositoryError::Reference { .. } => Error::not_found("referenced record does not exist"),
        RepositoryError::Constraint { .. } => {
            Error::invalid_request("request violates a data constraint")
        }
    }
}

/// Failure for a write whose acting account was deleted after its token was
/// issued.
pub(crate) fn account_gone() -> Error {
    Error::unauthorized("authenticated account no longer exists")
}
