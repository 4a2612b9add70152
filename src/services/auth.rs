use validator::Validate;

use crate::forms::FieldErrors;
use crate::forms::auth::SignInForm;
use crate::repository::AuthGateway;
use crate::services::{ServiceError, ServiceResult};
use crate::session::SessionContext;

/// Validates the credentials and exchanges them for a session.
pub async fn sign_in<G>(gateway: &G, form: SignInForm) -> ServiceResult<SessionContext>
where
    G: AuthGateway + ?Sized,
{
    let form = form.normalized();
    if let Err(errors) = form.validate() {
        log::error!("Failed to validate sign-in form: {errors}");
        return Err(ServiceError::Validation(FieldErrors::from(&errors)));
    }

    let token = gateway.sign_in(&form).await.map_err(|err| {
        log::error!("Failed to sign in {}: {err}", form.email);
        err
    })?;

    let session = SessionContext::signed_in(token);
    if !session.is_authenticated() {
        return Err(ServiceError::Remote("empty token in sign-in response".to_string()));
    }

    log::info!("Agent {} signed in", form.email);
    Ok(session)
}

pub fn sign_out(session: &mut SessionContext) {
    session.sign_out();
}
