//! Multi-step itinerary editor.
//!
//! The editor walks a draft through `Details → Itinerary → Photos → Preview`.
//! Moving forward runs the current step's validation; moving back is always
//! allowed. Every mutation goes through the editor so the day/item tree and
//! the recorded field errors never drift apart.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::itinerary::{DayPlan, Itinerary, ItineraryAction, ItineraryError};
use crate::domain::photo::PhotoAttachment;
use crate::domain::tour::{StoredTour, TourData, TourPayload};
use crate::domain::types::{DurationLabel, TourId};
use crate::forms::FieldErrors;
use crate::forms::itinerary::DETAILS_FIELDS;

pub mod draft;
pub mod store;

pub use draft::{DetailsChange, ItineraryDraft};

pub const ITINERARY_REQUIRED: &str = "Itinerary is required";
pub const DAY_WITHOUT_ITEMS: &str = "Each day must have at least one item";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum EditorStep {
    #[default]
    Details,
    Itinerary,
    Photos,
    Preview,
}

impl EditorStep {
    pub fn index(&self) -> usize {
        match self {
            EditorStep::Details => 0,
            EditorStep::Itinerary => 1,
            EditorStep::Photos => 2,
            EditorStep::Preview => 3,
        }
    }

    fn following(&self) -> Option<EditorStep> {
        match self {
            EditorStep::Details => Some(EditorStep::Itinerary),
            EditorStep::Itinerary => Some(EditorStep::Photos),
            EditorStep::Photos => Some(EditorStep::Preview),
            EditorStep::Preview => None,
        }
    }

    fn preceding(&self) -> Option<EditorStep> {
        match self {
            EditorStep::Details => None,
            EditorStep::Itinerary => Some(EditorStep::Details),
            EditorStep::Photos => Some(EditorStep::Itinerary),
            EditorStep::Preview => Some(EditorStep::Photos),
        }
    }

    /// Form fields whose errors belong to this step.
    fn fields(&self) -> &'static [&'static str] {
        match self {
            EditorStep::Details => &DETAILS_FIELDS,
            EditorStep::Itinerary => &["itinerary"],
            EditorStep::Photos => &["photos"],
            EditorStep::Preview => &[],
        }
    }
}

impl Display for EditorStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EditorStep::Details => "Tour Details",
            EditorStep::Itinerary => "Itinerary",
            EditorStep::Photos => "Photos",
            EditorStep::Preview => "Preview",
        };
        write!(f, "{label}")
    }
}

/// What happens to existing days when the duration changes.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DurationPolicy {
    /// Rebuild empty days from scratch, discarding every item.
    #[default]
    Regenerate,
    /// Keep the leading days and their items; add or drop days at the end.
    Preserve,
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SubmitMode {
    Create,
    Update,
}

/// Payload checked out for the remote create-or-update call.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub draft_id: TourId,
    pub mode: SubmitMode,
    pub payload: TourPayload,
}

/// Everything the host can ask the editor to do.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum EditorAction {
    SetDetails(DetailsChange),
    Itinerary(ItineraryAction),
    SetPhotos(Vec<PhotoAttachment>),
    RemovePhoto(usize),
    ClearPhotos,
    Next,
    Back,
}

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("{step} step has invalid fields")]
    InvalidStep { step: EditorStep, errors: FieldErrors },

    #[error("there is no step after {0}")]
    NoNextStep(EditorStep),

    #[error("there is no step before {0}")]
    NoPreviousStep(EditorStep),

    #[error("the draft can only be submitted from the preview step")]
    NotAtPreview,

    #[error("a submission for this draft is already in flight")]
    SubmissionPending,

    #[error("the draft has already been submitted")]
    AlreadySubmitted,

    #[error("photo {0} does not exist")]
    PhotoOutOfRange(usize),

    #[error(transparent)]
    Itinerary(#[from] ItineraryError),
}

#[derive(Clone, Debug)]
pub struct ItineraryEditor {
    draft_id: TourId,
    editing: bool,
    created_at: Option<DateTime<Utc>>,
    draft: ItineraryDraft,
    step: EditorStep,
    errors: FieldErrors,
    state: SubmissionState,
    policy: DurationPolicy,
}

impl Default for ItineraryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryEditor {
    /// Starts an empty draft with a freshly generated id.
    pub fn new() -> Self {
        Self {
            draft_id: TourId::generate(),
            editing: false,
            created_at: None,
            draft: ItineraryDraft::default(),
            step: EditorStep::Details,
            errors: FieldErrors::new(),
            state: SubmissionState::Idle,
            policy: DurationPolicy::default(),
        }
    }

    /// Starts editing an existing tour; its id and creation time are reused.
    pub fn from_stored(tour: StoredTour) -> Self {
        let created_at = tour.tour_data.created_at;
        Self {
            draft_id: tour.tour_id,
            editing: true,
            created_at,
            draft: ItineraryDraft::from_tour_data(tour.tour_data),
            ..Self::new()
        }
    }

    pub fn with_policy(mut self, policy: DurationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn draft_id(&self) -> &TourId {
        &self.draft_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn draft(&self) -> &ItineraryDraft {
        &self.draft
    }

    pub fn days(&self) -> &[DayPlan] {
        self.draft.itinerary.days()
    }

    pub fn step(&self) -> EditorStep {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn policy(&self) -> DurationPolicy {
        self.policy
    }

    /// Routes a host action to the matching operation.
    pub fn dispatch(&mut self, action: EditorAction) -> Result<(), EditorError> {
        match action {
            EditorAction::SetDetails(change) => self.update(change),
            EditorAction::Itinerary(action) => self.apply(action),
            EditorAction::SetPhotos(photos) => self.set_photos(photos),
            EditorAction::RemovePhoto(index) => self.remove_photo(index),
            EditorAction::ClearPhotos => self.set_photos(Vec::new()),
            EditorAction::Next => self.next().map(|_| ()),
            EditorAction::Back => self.back().map(|_| ()),
        }
    }

    pub fn update(&mut self, change: DetailsChange) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let field = change.field();
        match change {
            DetailsChange::Title(title) => self.draft.title = title,
            DetailsChange::Source(source) => self.draft.source = source,
            DetailsChange::Destinations(destinations) => self.draft.destinations = destinations,
            DetailsChange::Duration(duration) => self.change_duration(duration),
            DetailsChange::StartDate(date) => self.draft.start_date = date,
            DetailsChange::EndDate(date) => self.draft.end_date = date,
            DetailsChange::NumberOfTravellers(count) => self.draft.number_of_travellers = count,
            DetailsChange::Tags(tags) => self.draft.tags = tags,
        }
        self.errors.clear_fields(&[field]);
        Ok(())
    }

    pub fn set_duration(&mut self, duration: impl Into<String>) -> Result<(), EditorError> {
        self.update(DetailsChange::Duration(duration.into()))
    }

    fn change_duration(&mut self, duration: String) {
        if duration == self.draft.duration {
            return;
        }
        let label = DurationLabel::new(duration.as_str());
        self.draft.duration = duration;
        // Labels outside the offered options leave the days alone; the
        // Details step reports them.
        let Ok(label) = label else {
            return;
        };
        let days = label.day_count();
        match self.policy {
            DurationPolicy::Regenerate => self.draft.itinerary = Itinerary::with_days(days),
            DurationPolicy::Preserve => self.draft.itinerary.resize(days),
        }
        self.errors.clear_fields(&["itinerary"]);
    }

    /// Applies one item action; a rejected action leaves the tree unchanged.
    pub fn apply(&mut self, action: ItineraryAction) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.draft.itinerary.apply(action)?;
        if self.errors.contains("itinerary") && self.itinerary_errors().is_empty() {
            self.errors.clear_fields(&["itinerary"]);
        }
        Ok(())
    }

    /// Replaces the attachment list and validates it right away.
    pub fn set_photos(&mut self, photos: Vec<PhotoAttachment>) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.draft.photos = photos;
        self.refresh_photo_errors();
        Ok(())
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<(), EditorError> {
        self.ensure_idle()?;
        if index >= self.draft.photos.len() {
            return Err(EditorError::PhotoOutOfRange(index));
        }
        self.draft.photos.remove(index);
        self.refresh_photo_errors();
        Ok(())
    }

    fn refresh_photo_errors(&mut self) {
        self.errors.clear_fields(&["photos"]);
        self.errors.extend(self.photo_errors());
    }

    /// Validates the current step and advances when it passes.
    pub fn next(&mut self) -> Result<EditorStep, EditorError> {
        self.ensure_idle()?;
        let Some(following) = self.step.following() else {
            return Err(EditorError::NoNextStep(self.step));
        };

        let errors = self.step_errors(self.step);
        self.errors.clear_fields(self.step.fields());
        if !errors.is_empty() {
            self.errors.extend(errors.clone());
            return Err(EditorError::InvalidStep {
                step: self.step,
                errors,
            });
        }

        self.step = following;
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<EditorStep, EditorError> {
        self.ensure_idle()?;
        let previous = self
            .step
            .preceding()
            .ok_or(EditorError::NoPreviousStep(self.step))?;
        self.step = previous;
        Ok(self.step)
    }

    /// Errors that would block leaving `step`.
    pub fn step_errors(&self, step: EditorStep) -> FieldErrors {
        match step {
            EditorStep::Details => match self.draft.details_form().validate() {
                Ok(()) => FieldErrors::new(),
                Err(errors) => FieldErrors::from(&errors),
            },
            EditorStep::Itinerary => self.itinerary_errors(),
            EditorStep::Photos => self.photo_errors(),
            EditorStep::Preview => FieldErrors::new(),
        }
    }

    fn itinerary_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.draft.itinerary.is_empty() {
            errors.insert("itinerary", ITINERARY_REQUIRED);
        } else if !self.draft.itinerary.every_day_has_items() {
            errors.insert("itinerary", DAY_WITHOUT_ITEMS);
        }
        errors
    }

    fn photo_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(reason) = self.draft.photos.iter().find_map(PhotoAttachment::rejection) {
            errors.insert("photos", reason);
        }
        errors
    }

    /// Checks out the submission payload and blocks further changes until
    /// [`ItineraryEditor::complete_submit`] is called.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<Submission, EditorError> {
        self.ensure_idle()?;
        if self.step != EditorStep::Preview {
            return Err(EditorError::NotAtPreview);
        }

        for step in [EditorStep::Details, EditorStep::Itinerary, EditorStep::Photos] {
            let errors = self.step_errors(step);
            if !errors.is_empty() {
                self.errors.extend(errors.clone());
                return Err(EditorError::InvalidStep { step, errors });
            }
        }

        let submission = Submission {
            draft_id: self.draft_id.clone(),
            mode: if self.editing {
                SubmitMode::Update
            } else {
                SubmitMode::Create
            },
            payload: self.payload(now),
        };
        self.state = SubmissionState::Submitting;
        Ok(submission)
    }

    /// Settles an outstanding submission. A rejected one keeps the draft for a retry.
    pub fn complete_submit(&mut self, accepted: bool) {
        if self.state != SubmissionState::Submitting {
            return;
        }
        self.state = if accepted {
            SubmissionState::Submitted
        } else {
            SubmissionState::Idle
        };
    }

    fn payload(&self, now: DateTime<Utc>) -> TourPayload {
        let draft = &self.draft;
        TourPayload {
            tour_id: self.draft_id.clone(),
            tour_data: TourData {
                title: draft.title.clone(),
                source: draft.source.clone(),
                destinations: draft.destinations.clone(),
                duration: draft.duration.clone(),
                start_date: draft.start_date,
                end_date: draft.end_date,
                number_of_travellers: draft.number_of_travellers,
                tags: draft.tags.clone(),
                itinerary: draft.itinerary.clone().into_days(),
                created_at: Some(self.created_at.unwrap_or(now)),
                updated_at: Some(now),
                ..TourData::default()
            },
        }
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        match self.state {
            SubmissionState::Idle => Ok(()),
            SubmissionState::Submitting => Err(EditorError::SubmissionPending),
            SubmissionState::Submitted => Err(EditorError::AlreadySubmitted),
        }
    }
}
