use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    ConnectionError(#[from] PoolError),
    /// A unique or foreign key constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintError(String),
    /// A stored row could not be converted into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// The record to modify does not exist or is not in the expected state.
    #[error("not found")]
    NotFound,
    /// Any other database failure.
    #[error("database error: {0}")]
    DatabaseError(DieselError),
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
                info,
            ) => RepositoryError::ConstraintError(format!("{kind:?}: {}", info.message())),
            other => RepositoryError::DatabaseError(other),
        }
    }
}

impl RepositoryError {
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintError(_))
    }
}

/// Convenient alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
