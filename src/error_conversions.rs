//! Error conversion glue for `data` feature consumers.
//!
//! The domain layer must not depend on service/repository error types, but
//! hosts using only the `data` feature still want convenient conversions.

use crate::domain::itinerary::ItineraryError;
use crate::domain::types::TypeConstraintError;
use crate::editor::EditorError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<ItineraryError> for ServiceError {
    fn from(val: ItineraryError) -> Self {
        ServiceError::from(EditorError::from(val))
    }
}
