//! Collaborator traits for the remote tour API.
//!
//! Every call receives the caller's [`SessionContext`] explicitly; the
//! implementations never look up credentials on their own.

use async_trait::async_trait;

use crate::domain::tour::{RemoteAck, StoredTour, TourPayload};
use crate::domain::types::TourId;
use crate::forms::auth::SignInForm;
use crate::repository::errors::RepositoryResult;
use crate::session::SessionContext;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
#[cfg(feature = "server")]
pub mod remote;

#[cfg(feature = "server")]
pub use remote::RemoteApi;

#[async_trait]
pub trait TourReader: Send + Sync {
    async fn list_tours(&self, session: &SessionContext) -> RepositoryResult<Vec<StoredTour>>;
    async fn get_tour(
        &self,
        session: &SessionContext,
        tour_id: &TourId,
    ) -> RepositoryResult<Option<StoredTour>>;
}

#[async_trait]
pub trait TourWriter: Send + Sync {
    async fn create_tour(
        &self,
        session: &SessionContext,
        payload: &TourPayload,
    ) -> RepositoryResult<RemoteAck>;
    async fn update_tour(
        &self,
        session: &SessionContext,
        tour_id: &TourId,
        payload: &TourPayload,
    ) -> RepositoryResult<RemoteAck>;
    async fn delete_tour(
        &self,
        session: &SessionContext,
        tour_id: &TourId,
    ) -> RepositoryResult<RemoteAck>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn sign_in(&self, credentials: &SignInForm) -> RepositoryResult<String>;
}

/// Everything the host needs from the remote API, usable as `dyn TourBackend`.
pub trait TourBackend: TourReader + TourWriter + AuthGateway {}

impl<T> TourBackend for T where T: TourReader + TourWriter + AuthGateway {}
