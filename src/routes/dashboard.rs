use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Locale;
use crate::i18n::Catalog;
use crate::repository::DieselRepository;
use crate::routes::{base_context, dashboard_path, handle_page_error, redirect, render_template};
use crate::services::dashboard::{
    company_dashboard as company_dashboard_service, dashboard_role,
    influencer_dashboard as influencer_dashboard_service,
};

/// Sends the user to the dashboard of their role.
#[get("/dashboard")]
pub async fn dashboard(
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
) -> impl Responder {
    let locale = locale.into_inner();
    match dashboard_role(&user, repo.get_ref()) {
        Ok(role) => redirect(&dashboard_path(locale, role)),
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[get("/dashboard/influencer")]
pub async fn influencer_dashboard(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    match influencer_dashboard_service(&user, repo.get_ref()) {
        Ok(page) => {
            let mut context =
                base_context(&request, &flash_messages, Some(&user), "dashboard", locale);
            context.insert("page", &page);
            render_template(&tera, "dashboard/influencer.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[get("/dashboard/company")]
pub async fn company_dashboard(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    match company_dashboard_service(&user, repo.get_ref()) {
        Ok(page) => {
            let mut context =
                base_context(&request, &flash_messages, Some(&user), "dashboard", locale);
            context.insert("page", &page);
            render_template(&tera, "dashboard/company.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}
