use serde::Serialize;

use crate::domain::tour::TourRecord;
use crate::listing::SortKey;
use crate::pagination::Paginated;

/// Data required to render the tour list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourListPage {
    /// Requested page of the filtered, sorted list.
    pub tours: Paginated<TourRecord>,
    /// Sort applied, `None` when the requested key was not recognized.
    pub sort: Option<SortKey>,
    /// Inverted date range; the date filter was skipped.
    pub date_error: bool,
    /// At least one filter is active.
    pub can_reset: bool,
    /// Filters are active but nothing matched.
    pub not_found: bool,
}

/// Result of the name search.
#[derive(Debug, Serialize)]
pub struct TourSearchResults {
    pub query: String,
    pub results: Vec<TourRecord>,
}
