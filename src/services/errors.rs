use thiserror::Error;

use crate::broadcast::BroadcastError;
use crate::repository::errors::RepositoryError;

/// Errors surfaced by the client store to its callers.
///
/// None of them is fatal: the collection is left untouched and the caller may
/// retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Missing or blank required input.
    #[error("validation error: {0}")]
    Validation(String),
    /// The referenced client does not exist.
    #[error("client not found")]
    NotFound,
    /// The client's status forbids the operation.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<BroadcastError> for ServiceError {
    fn from(err: BroadcastError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
