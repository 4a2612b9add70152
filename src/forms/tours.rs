use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::types::{GuideId, lenient_date};
use crate::listing::{SortKey, TourFilters};

/// Query string of the tour list. Set-valued filters repeat their key
/// (`?destination=Jaipur&destination=Agra`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourListQuery {
    #[serde(default)]
    pub destination: Vec<String>,
    #[serde(default, rename = "guide")]
    pub guides: Vec<String>,
    #[serde(default, rename = "service")]
    pub services: Vec<String>,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl TourListQuery {
    /// Missing sort falls back to `latest`; an unrecognized one disables sorting.
    pub fn sort_key(&self) -> Option<SortKey> {
        match self.sort.as_deref() {
            None | Some("") => Some(SortKey::default()),
            Some(raw) => raw.parse().ok(),
        }
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn filters(&self) -> TourFilters {
        let clean = |values: &[String]| -> BTreeSet<String> {
            values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        };

        TourFilters {
            destination: clean(&self.destination),
            tour_guides: self
                .guides
                .iter()
                .filter_map(|id| GuideId::new(id.as_str()).ok())
                .collect(),
            services: clean(&self.services),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Query string of the name search.
#[derive(Debug, Default, Deserialize)]
pub struct TourSearchQuery {
    #[serde(default)]
    pub q: String,
}
