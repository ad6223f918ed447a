//! Translation of pool and Diesel failures into [`RepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Pool failures are connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Constraint violations keep the constraint name; everything else keeps the
/// database message.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            let constraint = info
                .constraint_name()
                .unwrap_or("unnamed constraint")
                .to_owned();
            match kind {
                DatabaseErrorKind::UniqueViolation => RepositoryError::duplicate(constraint),
                DatabaseErrorKind::ForeignKeyViolation => RepositoryError::reference(constraint),
                DatabaseErrorKind::CheckViolation => RepositoryError::constraint(constraint),
                DatabaseErrorKind::ClosedConnection => RepositoryError::connection(info.message()),
                _ => RepositoryError::query(info.message()),
            }
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            RepositoryError::query(other.to_string())
        }
    }
}
