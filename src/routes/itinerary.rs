use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::editor::EditorAction;
use crate::editor::store::DraftStore;
use crate::forms::itinerary::{StartDraftForm, UploadPhotosForm};
use crate::models::config::ServerConfig;
use crate::repository::TourBackend;
use crate::routes::{error_response, session_context};
use crate::services::itinerary as draft_service;

#[post("/drafts")]
pub async fn start_draft(
    form: web::Json<StartDraftForm>,
    session: Session,
    backend: web::Data<dyn TourBackend>,
    store: web::Data<DraftStore>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let context = session_context(&session);
    match draft_service::start_draft(
        backend.get_ref(),
        &context,
        &store,
        form.into_inner(),
        server_config.duration_policy,
    )
    .await
    {
        Ok(view) => HttpResponse::Created().json(view),
        Err(err) => error_response(&err),
    }
}

#[get("/drafts/{draft_id}")]
pub async fn show_draft(
    draft_id: web::Path<String>,
    session: Session,
    store: web::Data<DraftStore>,
) -> impl Responder {
    let context = session_context(&session);

    match draft_service::load_draft(&context, &store, &draft_id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[post("/drafts/{draft_id}/actions")]
pub async fn apply_action(
    draft_id: web::Path<String>,
    action: web::Json<EditorAction>,
    session: Session,
    store: web::Data<DraftStore>,
) -> impl Responder {
    let context = session_context(&session);

    match draft_service::apply_action(&context, &store, &draft_id, action.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[post("/drafts/{draft_id}/photos")]
pub async fn upload_photos(
    draft_id: web::Path<String>,
    MultipartForm(form): MultipartForm<UploadPhotosForm>,
    session: Session,
    store: web::Data<DraftStore>,
) -> impl Responder {
    let context = session_context(&session);

    match draft_service::attach_photos(&context, &store, &draft_id, form.into_attachments()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[post("/drafts/{draft_id}/submit")]
pub async fn submit_draft(
    draft_id: web::Path<String>,
    session: Session,
    backend: web::Data<dyn TourBackend>,
    store: web::Data<DraftStore>,
) -> impl Responder {
    let context = session_context(&session);
    match draft_service::submit_draft(backend.get_ref(), &context, &store, &draft_id).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(&err),
    }
}

#[delete("/drafts/{draft_id}")]
pub async fn discard_draft(
    draft_id: web::Path<String>,
    session: Session,
    store: web::Data<DraftStore>,
) -> impl Responder {
    let context = session_context(&session);

    match draft_service::discard_draft(&context, &store, &draft_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
