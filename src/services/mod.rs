//! Service layer sitting between the JSON routes and the core.

use thiserror::Error;

use crate::editor::EditorError;
use crate::forms::FieldErrors;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod itinerary;
pub mod tours;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not authorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    Editor(EditorError),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("remote API error: {0}")]
    Remote(String),

    #[error("type constraint: {0}")]
    TypeConstraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::ValidationError(message) => ServiceError::Form(message),
            other => ServiceError::Remote(other.to_string()),
        }
    }
}

impl From<EditorError> for ServiceError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::InvalidStep { errors, .. } => ServiceError::Validation(errors),
            EditorError::SubmissionPending => ServiceError::Conflict(err.to_string()),
            other => ServiceError::Editor(other),
        }
    }
}
