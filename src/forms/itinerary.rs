//! Forms used by the itinerary editor steps.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::types::DURATION_OPTIONS;

/// Fields checked before leaving the Details step.
pub const DETAILS_FIELDS: [&str; 8] = [
    "title",
    "source",
    "destinations",
    "duration",
    "start_date",
    "end_date",
    "number_of_travellers",
    "tags",
];

fn validate_duration(value: &str) -> Result<(), ValidationError> {
    if DURATION_OPTIONS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("duration"))
    }
}

#[derive(Debug, Clone, Default, Validate)]
/// Snapshot of the Details step fields.
pub struct DetailsForm {
    #[validate(length(min = 1, message = "Title is required!"))]
    pub title: String,
    #[validate(length(min = 1, message = "Source is required!"))]
    pub source: String,
    #[validate(length(min = 1, message = "At least one destination is required!"))]
    pub destinations: Vec<String>,
    #[validate(custom(function = "validate_duration", message = "Duration is required!"))]
    pub duration: String,
    #[validate(required(message = "Start date is required!"))]
    pub start_date: Option<NaiveDate>,
    #[validate(required(message = "End date is required!"))]
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Number of travellers is required!"))]
    pub number_of_travellers: u32,
    #[validate(length(min = 1, message = "At least one tag is required!"))]
    pub tags: Vec<String>,
}

/// Body of `POST /drafts`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDraftForm {
    /// Existing tour to edit; a new tour is drafted when absent.
    #[serde(default)]
    pub tour_id: Option<String>,
}

#[cfg(feature = "server")]
pub use upload::UploadPhotosForm;

#[cfg(feature = "server")]
mod upload {
    use actix_multipart::form::{MultipartForm, tempfile::TempFile};

    use crate::domain::photo::PhotoAttachment;

    #[derive(MultipartForm)]
    pub struct UploadPhotosForm {
        #[multipart(limit = "10MB")]
        pub photos: Vec<TempFile>,
    }

    impl UploadPhotosForm {
        /// Keeps only the metadata the editor validates.
        pub fn into_attachments(self) -> Vec<PhotoAttachment> {
            self.photos
                .into_iter()
                .map(|file| {
                    PhotoAttachment::new(
                        file.file_name.unwrap_or_else(|| "photo".to_string()),
                        file.content_type.map(|mime| mime.essence_str().to_string()),
                        file.size as u64,
                    )
                })
                .collect()
        }
    }
}
