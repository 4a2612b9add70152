//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::tour::{RemoteAck, StoredTour, TourPayload};
use crate::domain::types::TourId;
use crate::forms::auth::SignInForm;
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuthGateway, TourReader, TourWriter};
use crate::session::SessionContext;

mock! {
    pub Repository {}

    #[async_trait]
    impl TourReader for Repository {
        async fn list_tours(&self, session: &SessionContext) -> RepositoryResult<Vec<StoredTour>>;
        async fn get_tour(
            &self,
            session: &SessionContext,
            tour_id: &TourId,
        ) -> RepositoryResult<Option<StoredTour>>;
    }

    #[async_trait]
    impl TourWriter for Repository {
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
    impl AuthGateway for Repository {
        async fn sign_in(&self, credentials: &SignInForm) -> RepositoryResult<String>;
    }
}
