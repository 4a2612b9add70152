#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use pushkind_tours::domain::tour::{Availability, TourRecord};
use pushkind_tours::domain::types::{GuideId, TourId};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Tour created on `2024-01-{created_day}` with `views` total views.
pub fn tour(id: &str, destination: &str, created_day: u32, views: u64) -> TourRecord {
    TourRecord {
        id: TourId::new(id).unwrap(),
        name: format!("Tour {id}"),
        destination: destination.to_string(),
        duration: "2 Days 1 Night".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, created_day, 9, 0, 0).unwrap(),
        available: Availability::default(),
        total_views: views,
        tour_guides: Vec::new(),
        services: Vec::new(),
    }
}

pub fn with_guides(mut record: TourRecord, guides: &[&str]) -> TourRecord {
    record.tour_guides = guides.iter().map(|g| GuideId::new(*g).unwrap()).collect();
    record
}

pub fn with_services(mut record: TourRecord, services: &[&str]) -> TourRecord {
    record.services = services.iter().map(|s| s.to_string()).collect();
    record
}

pub fn available(mut record: TourRecord, start: NaiveDate, end: NaiveDate) -> TourRecord {
    record.available = Availability::new(Some(start), Some(end)).unwrap();
    record
}

pub fn ids(records: &[TourRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
