use crate::domain::tour::TourRecord;
use crate::domain::types::TourId;
use crate::dto::tours::{TourListPage, TourSearchResults};
use crate::forms::tours::{TourListQuery, TourSearchQuery};
use crate::listing::{derive_view, search_by_name};
use crate::pagination::Paginated;
use crate::repository::{TourReader, TourWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::session::SessionContext;

pub(crate) fn ensure_signed_in(session: &SessionContext) -> ServiceResult<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub(crate) fn parse_tour_id(raw: &str) -> ServiceResult<TourId> {
    TourId::new(raw).map_err(|_| ServiceError::Form("invalid tour id".to_string()))
}

/// Fetches every tour and converts it to the list read model.
///
/// Tours with an inverted availability window are skipped.
pub async fn fetch_records<R>(repo: &R, session: &SessionContext) -> ServiceResult<Vec<TourRecord>>
where
    R: TourReader + ?Sized,
{
    let stored = repo.list_tours(session).await.map_err(|err| {
        log::error!("Failed to fetch tours: {err}");
        err
    })?;

    let records = stored
        .into_iter()
        .filter_map(|tour| {
            let id = tour.tour_id.clone();
            TourRecord::try_from(tour)
                .map_err(|err| log::warn!("Skipping tour {id}: {err}"))
                .ok()
        })
        .collect();

    Ok(records)
}

/// Loads the filtered, sorted and paginated tour list.
pub async fn load_tour_list<R>(
    repo: &R,
    session: &SessionContext,
    query: &TourListQuery,
) -> ServiceResult<TourListPage>
where
    R: TourReader + ?Sized,
{
    ensure_signed_in(session)?;

    let records = fetch_records(repo, session).await?;
    let filters = query.filters();
    let sort = query.sort_key();
    let date_error = filters.date_error();

    let view = derive_view(&records, &filters, sort, date_error);
    let can_reset = filters.can_reset();
    let not_found = view.is_empty() && can_reset;

    Ok(TourListPage {
        tours: Paginated::from_ordered(&view, query.page()),
        sort,
        date_error,
        can_reset,
        not_found,
    })
}

/// Case-insensitive search by tour name over the unfiltered list.
pub async fn search_tours<R>(
    repo: &R,
    session: &SessionContext,
    query: &TourSearchQuery,
) -> ServiceResult<TourSearchResults>
where
    R: TourReader + ?Sized,
{
    ensure_signed_in(session)?;

    let records = fetch_records(repo, session).await?;
    Ok(TourSearchResults {
        query: query.q.trim().to_string(),
        results: search_by_name(&records, &query.q),
    })
}

/// Deletes a tour from the list view.
pub async fn delete_tour<R>(repo: &R, session: &SessionContext, tour_id: &str) -> ServiceResult<()>
where
    R: TourWriter + ?Sized,
{
    ensure_signed_in(session)?;
    let tour_id = parse_tour_id(tour_id)?;

    repo.delete_tour(session, &tour_id).await.map_err(|err| {
        log::error!("Failed to delete tour {tour_id}: {err}");
        err
    })?;

    log::info!("Deleted tour {tour_id}");
    Ok(())
}
