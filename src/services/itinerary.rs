use chrono::Utc;

use crate::domain::photo::PhotoAttachment;
use crate::domain::tour::RemoteAck;
use crate::domain::types::TourId;
use crate::dto::itinerary::{DraftView, SubmitOutcome};
use crate::editor::store::DraftStore;
use crate::editor::{
    DurationPolicy, EditorAction, EditorError, ItineraryEditor, Submission, SubmitMode,
};
use crate::forms::itinerary::StartDraftForm;
use crate::repository::{TourReader, TourWriter};
use crate::services::tours::{ensure_signed_in, parse_tour_id};
use crate::services::{ServiceError, ServiceResult};
use crate::session::SessionContext;

/// Where the host lands after a successful submission.
pub const TOUR_LIST_PATH: &str = "/app/tour";

/// Opens a draft: a blank one, or a copy of an existing tour when an id is
/// given. The editor is kept in `store` for this session until it is
/// submitted, discarded or left idle.
pub async fn start_draft<R>(
    repo: &R,
    session: &SessionContext,
    store: &DraftStore,
    form: StartDraftForm,
    policy: DurationPolicy,
) -> ServiceResult<DraftView>
where
    R: TourReader + ?Sized,
{
    ensure_signed_in(session)?;

    let editor = match form.tour_id.as_deref() {
        Some(raw) => {
            let tour_id = parse_tour_id(raw)?;
            let tour = repo
                .get_tour(session, &tour_id)
                .await
                .map_err(|err| {
                    log::error!("Failed to load tour {tour_id}: {err}");
                    err
                })?
                .ok_or(ServiceError::NotFound)?;
            ItineraryEditor::from_stored(tour)
        }
        None => ItineraryEditor::new(),
    }
    .with_policy(policy);

    let view = DraftView::from(&editor);
    store.insert(session, editor);
    Ok(view)
}

pub fn load_draft(
    session: &SessionContext,
    store: &DraftStore,
    draft_id: &str,
) -> ServiceResult<DraftView> {
    ensure_signed_in(session)?;
    let draft_id = parse_tour_id(draft_id)?;
    store
        .with_draft(session, &draft_id, |editor| DraftView::from(&*editor))
        .ok_or(ServiceError::NotFound)
}

/// Applies one editor action and returns the updated snapshot.
pub fn apply_action(
    session: &SessionContext,
    store: &DraftStore,
    draft_id: &str,
    action: EditorAction,
) -> ServiceResult<DraftView> {
    ensure_signed_in(session)?;
    let draft_id = parse_tour_id(draft_id)?;
    store
        .with_draft(session, &draft_id, |editor| -> Result<DraftView, EditorError> {
            editor.dispatch(action)?;
            Ok(DraftView::from(&*editor))
        })
        .ok_or(ServiceError::NotFound)?
        .map_err(ServiceError::from)
}

/// Replaces the draft's photos with the uploaded files.
pub fn attach_photos(
    session: &SessionContext,
    store: &DraftStore,
    draft_id: &str,
    photos: Vec<PhotoAttachment>,
) -> ServiceResult<DraftView> {
    apply_action(session, store, draft_id, EditorAction::SetPhotos(photos))
}

pub fn discard_draft(
    session: &SessionContext,
    store: &DraftStore,
    draft_id: &str,
) -> ServiceResult<()> {
    ensure_signed_in(session)?;
    let draft_id = parse_tour_id(draft_id)?;
    store
        .remove(session, &draft_id)
        .map(|_| ())
        .ok_or(ServiceError::NotFound)
}

/// Sends a checked-out submission to the create or update endpoint.
pub async fn dispatch_submission<R>(
    repo: &R,
    session: &SessionContext,
    submission: &Submission,
) -> ServiceResult<RemoteAck>
where
    R: TourWriter + ?Sized,
{
    let result = match submission.mode {
        SubmitMode::Create => repo.create_tour(session, &submission.payload).await,
        SubmitMode::Update => {
            repo.update_tour(session, &submission.draft_id, &submission.payload)
                .await
        }
    };

    let ack = result.map_err(|err| {
        log::error!("Failed to submit tour {}: {err}", submission.draft_id);
        err
    })?;

    if !ack.is_success() {
        log::error!(
            "Tour {} rejected with code {}: {}",
            submission.draft_id,
            ack.code,
            ack.message
        );
        return Err(ServiceError::Remote(ack.message));
    }

    Ok(ack)
}

/// Submits an editor the caller owns directly.
pub async fn submit_editor<R>(
    repo: &R,
    session: &SessionContext,
    editor: &mut ItineraryEditor,
) -> ServiceResult<SubmitOutcome>
where
    R: TourWriter + ?Sized,
{
    ensure_signed_in(session)?;

    let submission = editor.begin_submit(Utc::now())?;
    let result = dispatch_submission(repo, session, &submission).await;
    editor.complete_submit(result.is_ok());

    result.map(|ack| outcome(&submission, ack))
}

/// A stored draft checked out for submission.
///
/// Dropping it unsettled, as happens when the request is cancelled while the
/// remote call is pending, hands the draft back as `Idle`.
struct PendingSubmission<'a> {
    store: &'a DraftStore,
    owner: &'a SessionContext,
    draft_id: &'a TourId,
    settled: bool,
}

impl PendingSubmission<'_> {
    fn settle(&mut self, accepted: bool) {
        self.settled = true;
        let draft_id = self.draft_id;
        self.store.with_draft(self.owner, draft_id, |editor| editor.complete_submit(accepted));
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            log::warn!("Submission of tour {} was abandoned", self.draft_id);
            self.settle(false);
        }
    }
}

/// Submits a stored draft. The store lock is not held across the remote
/// call; the draft stays in `Submitting` meanwhile so concurrent actions are
/// refused. Accepted drafts leave the store, rejected or abandoned ones stay
/// for a retry.
pub async fn submit_draft<R>(
    repo: &R,
    session: &SessionContext,
    store: &DraftStore,
    draft_id: &str,
) -> ServiceResult<SubmitOutcome>
where
    R: TourWriter + ?Sized,
{
    ensure_signed_in(session)?;
    let draft_id = parse_tour_id(draft_id)?;

    let submission = store
        .with_draft(session, &draft_id, |editor| editor.begin_submit(Utc::now()))
        .ok_or(ServiceError::NotFound)??;
    let mut pending = PendingSubmission {
        store,
        owner: session,
        draft_id: &draft_id,
        settled: false,
    };

    let result = dispatch_submission(repo, session, &submission).await;
    pending.settle(result.is_ok());

    let ack = result?;
    store.remove(session, &draft_id);
    log::info!("Tour {draft_id} submitted");
    Ok(outcome(&submission, ack))
}

fn outcome(submission: &Submission, ack: RemoteAck) -> SubmitOutcome {
    let message = if ack.message.is_empty() {
        match submission.mode {
            SubmitMode::Create => "Tour created successfully".to_string(),
            SubmitMode::Update => "Tour updated successfully".to_string(),
        }
    } else {
        ack.message
    };

    SubmitOutcome {
        id: submission.draft_id.clone(),
        message,
        redirect: TOUR_LIST_PATH,
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::itinerary::ItineraryAction;
    use crate::domain::tour::{StoredTour, TourData, TourPayload};
    use crate::domain::types::ItemType;
    use crate::editor::draft::DetailsChange;
    use crate::editor::{EditorStep, SubmissionState};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::MockRepository;

    /// Writer whose calls never complete.
    struct StalledWriter;

    #[async_trait]
    impl TourWriter for StalledWriter {
        async fn create_tour(
            &self,
            _session: &SessionContext,
            _payload: &TourPayload,
        ) -> RepositoryResult<RemoteAck> {
            std::future::pending().await
        }

        async fn update_tour(
            &self,
            _session: &SessionContext,
            _tour_id: &TourId,
            _payload: &TourPayload,
        ) -> RepositoryResult<RemoteAck> {
            std::future::pending().await
        }

        async fn delete_tour(
            &self,
            _session: &SessionContext,
            _tour_id: &TourId,
        ) -> RepositoryResult<RemoteAck> {
            std::future::pending().await
        }
    }

    fn session() -> SessionContext {
        SessionContext::signed_in("token")
    }

    fn ack(code: u16, status: &str) -> RemoteAck {
        RemoteAck {
            status: status.into(),
            code,
            message: String::new(),
        }
    }

    fn fill_details(store: &DraftStore, id: &str) {
        let changes = vec![
            DetailsChange::Title("Golden Triangle".into()),
            DetailsChange::Source("Delhi".into()),
            DetailsChange::Destinations(vec!["Agra".into()]),
            DetailsChange::Duration("2 Days 1 Night".into()),
            DetailsChange::StartDate(chrono::NaiveDate::from_ymd_opt(2024, 7, 1)),
            DetailsChange::EndDate(chrono::NaiveDate::from_ymd_opt(2024, 7, 2)),
            DetailsChange::Tags(vec!["heritage".into()]),
        ];
        for change in changes {
            apply_action(&session(), store, id, EditorAction::SetDetails(change)).unwrap();
        }
    }

    fn ready_draft(store: &DraftStore) -> String {
        let id = store.insert(&session(), ItineraryEditor::new()).to_string();
        fill_details(store, &id);
        apply_action(&session(), store, &id, EditorAction::Next).unwrap();
        for day in 0..2 {
            apply_action(
                &session(),
                store,
                &id,
                EditorAction::Itinerary(ItineraryAction::AddItem {
                    day,
                    item_type: ItemType::Meals,
                }),
            )
            .unwrap();
        }
        apply_action(&session(), store, &id, EditorAction::Next).unwrap();
        apply_action(&session(), store, &id, EditorAction::Next).unwrap();
        id
    }

    #[actix_web::test]
    async fn start_draft_seeds_from_existing_tour() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour().returning(|_, id| {
            Ok(Some(StoredTour {
                tour_id: id.clone(),
                organization_id: None,
                tour_data: TourData {
                    title: "Kerala backwaters".into(),
                    duration: "2 Days 1 Night".into(),
                    ..TourData::default()
                },
            }))
        });
        let store = DraftStore::new();

        let view = start_draft(
            &repo,
            &session(),
            &store,
            StartDraftForm {
                tour_id: Some("tour-1".into()),
            },
            DurationPolicy::default(),
        )
        .await
        .unwrap();

        assert!(view.editing);
        assert_eq!(view.id.as_str(), "tour-1");
        assert_eq!(view.draft.itinerary.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn start_draft_reports_missing_tour() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour().returning(|_, _| Ok(None));
        let store = DraftStore::new();

        let result = start_draft(
            &repo,
            &session(),
            &store,
            StartDraftForm {
                tour_id: Some("gone".into()),
            },
            DurationPolicy::default(),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_step_surfaces_field_errors() {
        let store = DraftStore::new();
        let id = store.insert(&session(), ItineraryEditor::new()).to_string();

        match apply_action(&session(), &store, &id, EditorAction::Next) {
            Err(ServiceError::Validation(errors)) => assert!(errors.contains("title")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(
            load_draft(&session(), &store, &id).unwrap().step,
            EditorStep::Details
        );
    }

    #[actix_web::test]
    async fn accepted_submission_leaves_the_store() {
        let store = DraftStore::new();
        let id = ready_draft(&store);

        let mut repo = MockRepository::new();
        repo.expect_create_tour()
            .withf(|_, payload| payload.tour_data.title == "Golden Triangle")
            .times(1)
            .returning(|_, _| Ok(ack(201, "success")));

        let outcome = submit_draft(&repo, &session(), &store, &id).await.unwrap();
        assert_eq!(outcome.message, "Tour created successfully");
        assert_eq!(outcome.redirect, TOUR_LIST_PATH);
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn rejected_submission_keeps_the_draft() {
        let store = DraftStore::new();
        let id = ready_draft(&store);

        let mut repo = MockRepository::new();
        repo.expect_create_tour()
            .returning(|_, _| Ok(ack(500, "error")));

        let result = submit_draft(&repo, &session(), &store, &id).await;
        assert!(matches!(result, Err(ServiceError::Remote(_))));

        let view = load_draft(&session(), &store, &id).unwrap();
        assert_eq!(view.state, SubmissionState::Idle);
        assert_eq!(view.step, EditorStep::Preview);
        assert_eq!(view.draft.title, "Golden Triangle");
    }

    #[actix_web::test]
    async fn transport_failure_keeps_the_draft() {
        let store = DraftStore::new();
        let id = ready_draft(&store);

        let mut repo = MockRepository::new();
        repo.expect_create_tour()
            .returning(|_, _| Err(RepositoryError::ConnectionError("timeout".into())));

        assert!(submit_draft(&repo, &session(), &store, &id).await.is_err());
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn owned_editor_is_settled() {
        let store = DraftStore::new();
        let id = ready_draft(&store);
        let mut editor = store
            .remove(&session(), &TourId::new(id.as_str()).unwrap())
            .unwrap();

        let mut repo = MockRepository::new();
        repo.expect_create_tour()
            .returning(|_, _| Ok(ack(200, "success")));

        let outcome = submit_editor(&repo, &session(), &mut editor).await.unwrap();
        assert_eq!(outcome.id.as_str(), id);
        assert_eq!(editor.state(), SubmissionState::Submitted);
    }

    #[test]
    fn discard_removes_the_draft() {
        let store = DraftStore::new();
        let id = store.insert(&session(), ItineraryEditor::new()).to_string();

        discard_draft(&session(), &store, &id).unwrap();
        assert!(matches!(
            discard_draft(&session(), &store, &id),
            Err(ServiceError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn cancelled_submission_returns_the_draft() {
        let store = DraftStore::new();
        let id = ready_draft(&store);

        let cancelled = actix_web::rt::time::timeout(
            Duration::from_millis(20),
            submit_draft(&StalledWriter, &session(), &store, &id),
        )
        .await;
        assert!(cancelled.is_err());

        let view = load_draft(&session(), &store, &id).unwrap();
        assert_eq!(view.state, SubmissionState::Idle);
        let view = apply_action(&session(), &store, &id, EditorAction::Back).unwrap();
        assert_eq!(view.step, EditorStep::Photos);
    }

    #[actix_web::test]
    async fn other_sessions_cannot_reach_the_draft() {
        let store = DraftStore::new();
        let id = ready_draft(&store);
        let intruder = SessionContext::signed_in("other-token");

        assert!(matches!(
            load_draft(&intruder, &store, &id),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            apply_action(&intruder, &store, &id, EditorAction::Back),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            discard_draft(&intruder, &store, &id),
            Err(ServiceError::NotFound)
        ));

        let repo = MockRepository::new();
        assert!(matches!(
            submit_draft(&repo, &intruder, &store, &id).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            load_draft(&SessionContext::anonymous(), &store, &id),
            Err(ServiceError::Unauthorized)
        ));
        assert_eq!(store.len(), 1);
    }
}
