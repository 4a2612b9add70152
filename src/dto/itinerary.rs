use serde::Serialize;

use crate::domain::types::{DURATION_OPTIONS, ItemType, TourId};
use crate::editor::{
    DurationPolicy, EditorStep, ItineraryDraft, ItineraryEditor, SubmissionState,
};
use crate::forms::FieldErrors;

/// Snapshot of an editor returned after every action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub id: TourId,
    pub editing: bool,
    pub step: EditorStep,
    pub step_index: usize,
    pub state: SubmissionState,
    pub duration_policy: DurationPolicy,
    pub draft: ItineraryDraft,
    pub errors: FieldErrors,
    /// Day numbers still lacking items.
    pub empty_days: Vec<u32>,
    pub duration_options: &'static [&'static str],
    pub item_types: [ItemType; 4],
}

impl From<&ItineraryEditor> for DraftView {
    fn from(editor: &ItineraryEditor) -> Self {
        Self {
            id: editor.draft_id().clone(),
            editing: editor.is_editing(),
            step: editor.step(),
            step_index: editor.step().index(),
            state: editor.state(),
            duration_policy: editor.policy(),
            draft: editor.draft().clone(),
            errors: editor.errors().clone(),
            empty_days: editor.draft().itinerary.empty_days(),
            duration_options: &DURATION_OPTIONS,
            item_types: ItemType::ALL,
        }
    }
}

/// Outcome of a confirmed submission; the host navigates back to the list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub id: TourId,
    pub message: String,
    pub redirect: &'static str,
}
