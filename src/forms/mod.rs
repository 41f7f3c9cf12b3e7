//! Form definitions backing the client routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod main;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid start date `{0}`")]
    InvalidDate(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}
