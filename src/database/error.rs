use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
    /// An error caused by an invalid Postgres connection url.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An error caused by an [`sqlx`] error.
    #[error("received a pool error: {0}")]
    Internal(sqlx::Error),
    /// Failure while applying the bundled migrations at startup.
    #[error("failed to run migrations: {0}")]
    Migration(sqlx::migrate::MigrateError),
    /// A write collided with a unique index. Kept as its own variant so
    /// callers can map it to a conflict instead of a server error.
    #[error("unique constraint violated")]
    UniqueViolation,
    /// The pool does not have a reliable connection to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| match &e {
            sqlx::Error::Database(err)
                if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Report::new(e).change_context(Error::UniqueViolation)
            }
            _ => Report::new(Error::Internal(e)),
        })
    }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Classification helpers over `Report<Error>`, since downcasting at
/// every call site gets unwieldy.
pub trait ErrorExt2 {
    fn is_unhealthy(&self) -> bool;
    fn is_unique_violation(&self) -> bool;
}

impl ErrorExt2 for error_stack::Report<Error> {
    fn is_unhealthy(&self) -> bool {
        self.downcast_ref::<Error>()
            .map(|v| matches!(v, Error::UnhealthyPool))
            .unwrap_or_default()
    }

    fn is_unique_violation(&self) -> bool {
        self.downcast_ref::<Error>()
            .map(|v| matches!(v, Error::UniqueViolation))
            .unwrap_or_default()
    }
}
