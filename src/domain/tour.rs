use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::itinerary::DayPlan;
use crate::domain::types::{GuideId, TourId, TypeConstraintError, lenient_date};

/// Window during which a tour can be booked.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl Availability {
    /// Builds a window, rejecting one that starts after it ends.
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, TypeConstraintError> {
        if let (Some(start), Some(end)) = (start_date, end_date)
            && start > end
        {
            return Err(TypeConstraintError::InvertedWindow);
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Whether `date` lies inside the window, bounds included.
    ///
    /// A window missing either end contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}

/// Read model used by the tour list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourRecord {
    pub id: TourId,
    pub name: String,
    pub destination: String,
    pub duration: String,
    pub created_at: DateTime<Utc>,
    pub available: Availability,
    pub total_views: u64,
    pub tour_guides: Vec<GuideId>,
    pub services: Vec<String>,
}

/// Tour body exchanged with the remote API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TourData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_travellers: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<DayPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub total_views: u64,
    #[serde(default, skip_serializing)]
    pub tour_guides: Vec<GuideId>,
    #[serde(default, skip_serializing)]
    pub services: Vec<String>,
}

/// Tour as stored by the remote API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTour {
    pub tour_id: TourId,
    #[serde(default)]
    pub organization_id: Option<i64>,
    pub tour_data: TourData,
}

/// Body of a create or update request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourPayload {
    pub tour_id: TourId,
    pub tour_data: TourData,
}

/// Status pair returned by write endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteAck {
    pub status: String,
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl RemoteAck {
    /// A write is acknowledged only by a 200/201 code paired with a success status.
    pub fn is_success(&self) -> bool {
        matches!(self.code, 200 | 201) && self.status == "success"
    }
}

impl TryFrom<StoredTour> for TourRecord {
    type Error = TypeConstraintError;

    fn try_from(tour: StoredTour) -> Result<Self, Self::Error> {
        let data = tour.tour_data;
        let available = Availability::new(data.start_date, data.end_date)?;

        Ok(Self {
            id: tour.tour_id,
            name: data.title,
            destination: data.destinations.join(", "),
            duration: data.duration,
            created_at: data.created_at.unwrap_or_default(),
            available,
            total_views: data.total_views,
            tour_guides: data.tour_guides,
            services: data.services,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn availability_rejects_inverted_window() {
        let result = Availability::new(Some(date(2024, 6, 2)), Some(date(2024, 6, 1)));
        assert_eq!(result, Err(TypeConstraintError::InvertedWindow));
    }

    #[test]
    fn availability_contains_is_inclusive() {
        let window = Availability::new(Some(date(2024, 6, 1)), Some(date(2024, 6, 5))).unwrap();
        assert!(window.contains(date(2024, 6, 1)));
        assert!(window.contains(date(2024, 6, 5)));
        assert!(!window.contains(date(2024, 6, 6)));
        assert!(!Availability::default().contains(date(2024, 6, 1)));
    }

    #[test]
    fn stored_tour_maps_to_record() {
        let stored: StoredTour = serde_json::from_value(json!({
            "id": 7,
            "tourId": "tour-1",
            "organizationId": 3,
            "tourData": {
                "title": "Golden Triangle",
                "source": "New Delhi",
                "destinations": ["Jaipur", "Agra"],
                "duration": "3 Days 2 Nights",
                "startDate": "2024-06-01T00:00:00.000Z",
                "endDate": "2024-06-03",
                "numberOfTravellers": 2,
                "tags": ["Family"],
                "itinerary": [],
                "createdAt": "2024-05-20T08:00:00Z"
            }
        }))
        .unwrap();

        let record = TourRecord::try_from(stored).unwrap();

        assert_eq!(record.id.as_str(), "tour-1");
        assert_eq!(record.name, "Golden Triangle");
        assert_eq!(record.destination, "Jaipur, Agra");
        assert_eq!(record.available.start_date(), Some(date(2024, 6, 1)));
        assert_eq!(record.total_views, 0);
        assert!(record.tour_guides.is_empty());
    }

    #[test]
    fn sparse_tour_data_decodes_with_defaults() {
        let stored: StoredTour = serde_json::from_value(json!({
            "tourId": "tour-2",
            "tourData": { "destinations": ["Goa"] }
        }))
        .unwrap();

        assert_eq!(stored.tour_data.title, "");
        assert_eq!(stored.tour_data.source, "");
        assert_eq!(stored.tour_data.duration, "");
        let record = TourRecord::try_from(stored).unwrap();
        assert_eq!(record.destination, "Goa");
    }

    #[test]
    fn ack_requires_code_and_status() {
        let ok = RemoteAck {
            status: "success".into(),
            code: 201,
            message: String::new(),
        };
        let wrong_code = RemoteAck { code: 202, ..ok.clone() };
        let wrong_status = RemoteAck {
            status: "error".into(),
            ..ok.clone()
        };
        assert!(ok.is_success());
        assert!(!wrong_code.is_success());
        assert!(!wrong_status.is_success());
    }
}
