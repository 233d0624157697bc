use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{ApplicationId, Locale};
use crate::forms::applications::{ApplicationStatusForm, ApplicationStatusFormPayload};
use crate::i18n::Catalog;
use crate::repository::DieselRepository;
use crate::routes::{handle_service_error, redirect};
use crate::services::ServiceError;
use crate::services::applications::decide_application;

#[post("/applications/{application_id}/status")]
pub async fn set_application_status(
    path: web::Path<(Locale, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    web::Form(form): web::Form<ApplicationStatusForm>,
) -> impl Responder {
    let (locale, application_id) = path.into_inner();
    let back = format!("/{locale}/dashboard/company");

    let application_id = match ApplicationId::new(application_id) {
        Ok(id) => id,
        Err(e) => return handle_service_error(e.into(), &catalog, locale, &back),
    };

    let payload: ApplicationStatusFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return handle_service_error(ServiceError::from(e), &catalog, locale, &back),
    };

    match decide_application(&user, application_id, payload, repo.get_ref()) {
        Ok((campaign_id, status)) => {
            let key = format!("flash.application_{status}");
            FlashMessage::success(catalog.translate(locale, &key)).send();
            redirect(&format!("/{locale}/campaigns/{campaign_id}"))
        }
        Err(err) => handle_service_error(err, &catalog, locale, &back),
    }
}
