use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::itinerary::Itinerary;
use crate::domain::photo::PhotoAttachment;
use crate::domain::tour::TourData;
use crate::domain::types::{DurationLabel, lenient_date};
use crate::forms::itinerary::DetailsForm;

/// Local, not-yet-submitted tour owned by one editing session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDraft {
    pub title: String,
    pub source: String,
    pub destinations: Vec<String>,
    pub duration: String,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    pub number_of_travellers: u32,
    pub tags: Vec<String>,
    pub itinerary: Itinerary,
    pub photos: Vec<PhotoAttachment>,
}

impl Default for ItineraryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            source: String::new(),
            destinations: Vec::new(),
            duration: String::new(),
            start_date: None,
            end_date: None,
            number_of_travellers: 1,
            tags: Vec::new(),
            itinerary: Itinerary::default(),
            photos: Vec::new(),
        }
    }
}

impl ItineraryDraft {
    /// Seeds a draft from a stored tour, keeping its itinerary verbatim.
    ///
    /// A stored tour without days gets the days its duration implies, or
    /// none when the duration is not one of the offered options.
    pub fn from_tour_data(data: TourData) -> Self {
        let itinerary = if data.itinerary.is_empty() {
            DurationLabel::new(data.duration.as_str())
                .map(|label| Itinerary::with_days(label.day_count()))
                .unwrap_or_default()
        } else {
            Itinerary::from_days(data.itinerary)
        };

        Self {
            title: data.title,
            source: data.source,
            destinations: data.destinations,
            duration: data.duration,
            start_date: data.start_date,
            end_date: data.end_date,
            number_of_travellers: data.number_of_travellers.max(1),
            tags: data.tags,
            itinerary,
            photos: Vec::new(),
        }
    }

    pub fn details_form(&self) -> DetailsForm {
        DetailsForm {
            title: self.title.clone(),
            source: self.source.clone(),
            destinations: self.destinations.clone(),
            duration: self.duration.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            number_of_travellers: self.number_of_travellers,
            tags: self.tags.clone(),
        }
    }
}

/// Single-field edit on the Details step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DetailsChange {
    Title(String),
    Source(String),
    Destinations(Vec<String>),
    Duration(String),
    #[serde(with = "lenient_date")]
    StartDate(Option<NaiveDate>),
    #[serde(with = "lenient_date")]
    EndDate(Option<NaiveDate>),
    NumberOfTravellers(u32),
    Tags(Vec<String>),
}

impl DetailsChange {
    /// Name of the form field the change targets.
    pub fn field(&self) -> &'static str {
        match self {
            DetailsChange::Title(_) => "title",
            DetailsChange::Source(_) => "source",
            DetailsChange::Destinations(_) => "destinations",
            DetailsChange::Duration(_) => "duration",
            DetailsChange::StartDate(_) => "start_date",
            DetailsChange::EndDate(_) => "end_date",
            DetailsChange::NumberOfTravellers(_) => "number_of_travellers",
            DetailsChange::Tags(_) => "tags",
        }
    }
}
