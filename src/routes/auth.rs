use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};
use serde_json::json;

use crate::forms::auth::SignInForm;
use crate::repository::TourBackend;
use crate::routes::{error_response, session_context};
use crate::services::auth as auth_service;
use crate::session::SESSION_TOKEN_KEY;

#[post("/auth/signin")]
pub async fn sign_in(
    form: web::Json<SignInForm>,
    session: Session,
    backend: web::Data<dyn TourBackend>,
) -> impl Responder {
    let context = match auth_service::sign_in(backend.get_ref(), form.into_inner()).await {
        Ok(context) => context,
        Err(err) => return error_response(&err),
    };

    session.renew();
    if let Some(token) = context.token()
        && let Err(err) = session.insert(SESSION_TOKEN_KEY, token)
    {
        log::error!("Failed to store session token: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().json(json!({ "authenticated": true }))
}

#[post("/auth/signout")]
pub async fn sign_out(session: Session) -> impl Responder {
    let mut context = session_context(&session);
    auth_service::sign_out(&mut context);
    session.purge();
    HttpResponse::Ok().json(json!({ "authenticated": context.is_authenticated() }))
}
