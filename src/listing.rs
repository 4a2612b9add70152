//! Client-side filter and sort pipeline behind the tour list.
//!
//! [`derive_view`] never fails: empty filter sets and absent dates are no-ops,
//! an unknown sort key keeps the input order and an inverted date range only
//! disables the date filter.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::tour::TourRecord;
use crate::domain::types::{GuideId, TypeConstraintError};

/// Ordering applied before filtering.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
    /// Most viewed first.
    Popular,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest" => Ok(SortKey::Latest),
            "oldest" => Ok(SortKey::Oldest),
            "popular" => Ok(SortKey::Popular),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// User-adjusted filter state. Empty sets and absent dates impose no constraint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TourFilters {
    pub destination: BTreeSet<String>,
    pub tour_guides: BTreeSet<GuideId>,
    pub services: BTreeSet<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TourFilters {
    /// True when both dates are set and the range is inverted.
    pub fn date_error(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if start > end)
    }

    /// Whether any constraint is active, i.e. the UI can offer a reset.
    pub fn can_reset(&self) -> bool {
        !self.destination.is_empty()
            || !self.tour_guides.is_empty()
            || !self.services.is_empty()
            || (self.start_date.is_some() && self.end_date.is_some())
    }
}

fn sort_records(records: &mut [TourRecord], sort: Option<SortKey>) {
    // `sort_by` is stable, so equal keys keep their input order.
    match sort {
        Some(SortKey::Latest) => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortKey::Oldest) => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        Some(SortKey::Popular) => records.sort_by(|a, b| b.total_views.cmp(&a.total_views)),
        None => {}
    }
}

/// Sorts the full input, then narrows it by every active filter.
pub fn derive_view(
    records: &[TourRecord],
    filters: &TourFilters,
    sort: Option<SortKey>,
    date_error: bool,
) -> Vec<TourRecord> {
    let mut view = records.to_vec();
    sort_records(&mut view, sort);

    if !filters.destination.is_empty() {
        view.retain(|tour| filters.destination.contains(&tour.destination));
    }

    if !filters.tour_guides.is_empty() {
        view.retain(|tour| {
            tour.tour_guides
                .iter()
                .any(|guide| filters.tour_guides.contains(guide))
        });
    }

    if !filters.services.is_empty() {
        view.retain(|tour| {
            tour.services
                .iter()
                .any(|service| filters.services.contains(service))
        });
    }

    if !date_error && let (Some(start), Some(_)) = (filters.start_date, filters.end_date) {
        view.retain(|tour| tour.available.contains(start));
    }

    view
}

/// Case-insensitive name search over the unfiltered list.
pub fn search_by_name(records: &[TourRecord], query: &str) -> Vec<TourRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|tour| tour.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::domain::tour::Availability;
    use crate::domain::types::TourId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn record(id: &str, day: u32, views: u64) -> TourRecord {
        TourRecord {
            id: TourId::new(id).unwrap(),
            name: format!("Tour {id}"),
            destination: "Jaipur".into(),
            duration: "3 Days 2 Nights".into(),
            created_at: created(day),
            available: Availability::new(Some(date(2024, 6, 1)), Some(date(2024, 6, 10))).unwrap(),
            total_views: views,
            tour_guides: Vec::new(),
            services: Vec::new(),
        }
    }

    fn ids(records: &[TourRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let records = vec![record("a", 1, 0), record("b", 3, 0), record("c", 2, 0)];
        assert!("trending".parse::<SortKey>().is_err());
        let view = derive_view(&records, &TourFilters::default(), None, false);
        assert_eq!(ids(&view), vec!["a", "b", "c"]);
    }

    #[test]
    fn popular_ties_keep_input_order() {
        let records = vec![record("a", 1, 5), record("b", 2, 9), record("c", 3, 5)];
        let view = derive_view(
            &records,
            &TourFilters::default(),
            Some(SortKey::Popular),
            false,
        );
        assert_eq!(ids(&view), vec!["b", "a", "c"]);
    }

    #[test]
    fn guide_and_service_filters_match_any() {
        let mut guided = record("guided", 1, 0);
        guided.tour_guides = vec![GuideId::new("g-1").unwrap(), GuideId::new("g-2").unwrap()];
        guided.services = vec!["Lunch".into()];
        let plain = record("plain", 2, 0);

        let filters = TourFilters {
            tour_guides: [GuideId::new("g-2").unwrap()].into(),
            services: ["Lunch".to_string(), "Audio guide".to_string()].into(),
            ..TourFilters::default()
        };

        let view = derive_view(&[guided, plain], &filters, Some(SortKey::Latest), false);
        assert_eq!(ids(&view), vec!["guided"]);
    }

    #[test]
    fn date_filter_checks_start_against_window() {
        let mut late = record("late", 1, 0);
        late.available = Availability::new(Some(date(2024, 7, 1)), Some(date(2024, 7, 5))).unwrap();
        let mut open = record("open", 2, 0);
        open.available = Availability::new(Some(date(2024, 6, 1)), None).unwrap();
        let records = vec![record("june", 3, 0), late, open];

        let filters = TourFilters {
            start_date: Some(date(2024, 6, 10)),
            end_date: Some(date(2024, 6, 12)),
            ..TourFilters::default()
        };

        let view = derive_view(&records, &filters, None, filters.date_error());
        assert_eq!(ids(&view), vec!["june"]);
    }

    #[test]
    fn date_filter_needs_both_dates() {
        let records = vec![record("a", 1, 0)];
        let filters = TourFilters {
            start_date: Some(date(2030, 1, 1)),
            ..TourFilters::default()
        };
        assert_eq!(derive_view(&records, &filters, None, false).len(), 1);
        assert!(!filters.can_reset());
    }

    #[test]
    fn name_search_is_case_insensitive() {
        let records = vec![record("alpha", 1, 0), record("beta", 2, 0)];
        let found = search_by_name(&records, "  TOUR AL ");
        assert_eq!(ids(&found), vec!["alpha"]);
        assert!(search_by_name(&records, "   ").is_empty());
    }
}
