use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, web};
use serde_json::json;

use crate::forms::tours::{TourListQuery, TourSearchQuery};
use crate::repository::TourBackend;
use crate::routes::{error_response, session_context};
use crate::services::tours as tour_service;

/// Filtered tour list. Repeated keys carry multi-valued filters, which
/// `web::Query` cannot decode, so the raw query string goes through
/// `serde_html_form`.
#[get("/tours")]
pub async fn list_tours(
    req: HttpRequest,
    session: Session,
    backend: web::Data<dyn TourBackend>,
) -> impl Responder {
    let query: TourListQuery = match serde_html_form::from_str(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            log::error!("Failed to parse tour list query: {err}");
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    let context = session_context(&session);
    match tour_service::load_tour_list(backend.get_ref(), &context, &query).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[get("/tours/search")]
pub async fn search_tours(
    query: web::Query<TourSearchQuery>,
    session: Session,
    backend: web::Data<dyn TourBackend>,
) -> impl Responder {
    let context = session_context(&session);
    match tour_service::search_tours(backend.get_ref(), &context, &query).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(err) => error_response(&err),
    }
}

#[delete("/tours/{tour_id}")]
pub async fn delete_tour(
    tour_id: web::Path<String>,
    session: Session,
    backend: web::Data<dyn TourBackend>,
) -> impl Responder {
    let context = session_context(&session);
    match tour_service::delete_tour(backend.get_ref(), &context, &tour_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
