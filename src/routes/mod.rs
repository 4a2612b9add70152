//! JSON routes served by the back-office host.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;
use crate::session::{SESSION_TOKEN_KEY, SessionContext};

pub mod auth;
pub mod itinerary;
pub mod tours;

/// Reads the bearer token stored in the cookie session.
pub fn session_context(session: &Session) -> SessionContext {
    match session.get::<String>(SESSION_TOKEN_KEY) {
        Ok(Some(token)) => SessionContext::signed_in(token),
        Ok(None) => SessionContext::anonymous(),
        Err(err) => {
            log::warn!("Failed to read session token: {err}");
            SessionContext::anonymous()
        }
    }
}

pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::Editor(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Validation(errors) => HttpResponse::UnprocessableEntity().json(json!({
            "error": err.to_string(),
            "errors": errors,
        })),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Remote(_) => HttpResponse::BadGateway().json(body),
        ServiceError::Internal(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Registers every route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_in)
        .service(auth::sign_out)
        .service(tours::search_tours)
        .service(tours::list_tours)
        .service(tours::delete_tour)
        .service(itinerary::start_draft)
        .service(itinerary::show_draft)
        .service(itinerary::apply_action)
        .service(itinerary::upload_photos)
        .service(itinerary::submit_draft)
        .service(itinerary::discard_draft);
}
