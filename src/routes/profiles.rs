use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::profile::ProfileUpdate;
use crate::domain::types::{Locale, Role};
use crate::dto::profiles::ProfileFormDto;
use crate::forms::profiles::{CompanyProfileForm, InfluencerProfileForm};
use crate::i18n::Catalog;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, dashboard_path, form_error_context, form_error_message, handle_page_error,
    handle_service_error, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::profiles::{load_profile_for_edit, update_profile};

fn edit_template(role: Role) -> String {
    format!("profile/edit_{role}.html")
}

#[allow(clippy::too_many_arguments)]
fn show_edit_form(
    request: &HttpRequest,
    locale: Locale,
    role: Role,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    catalog: &Catalog,
    tera: &Tera,
) -> HttpResponse {
    match load_profile_for_edit(user, role, repo) {
        Ok(page) => {
            let mut context = base_context(request, flash_messages, Some(user), "profile", locale);
            context.insert("page", &page);
            render_template(tera, &edit_template(role), &context)
        }
        Err(err) => handle_page_error(err, catalog, locale),
    }
}

/// Saves the converted form. A rejected submission renders the edit page
/// again with `keep_input` applied over the stored values.
#[allow(clippy::too_many_arguments)]
fn save_profile(
    request: &HttpRequest,
    locale: Locale,
    role: Role,
    user: &AuthenticatedUser,
    update: Result<ProfileUpdate, ServiceError>,
    keep_input: impl FnOnce(&mut ProfileFormDto),
    repo: &DieselRepository,
    catalog: &Catalog,
    tera: &Tera,
) -> HttpResponse {
    let back = format!("{}/profile/edit", dashboard_path(locale, role));

    let err = match update.and_then(|update| update_profile(user, update, repo)) {
        Ok(()) => {
            FlashMessage::success(catalog.translate(locale, "flash.profile_updated")).send();
            return redirect(&dashboard_path(locale, role));
        }
        Err(err) => err,
    };
    let Some(message) = form_error_message(&err, catalog, locale) else {
        return handle_service_error(err, catalog, locale, &back);
    };
    match load_profile_for_edit(user, role, repo) {
        Ok(mut page) => {
            keep_input(&mut page.profile);
            let mut context = form_error_context(request, message, Some(user), "profile", locale);
            context.insert("page", &page);
            render_template(tera, &edit_template(role), &context)
        }
        Err(err) => handle_page_error(err, catalog, locale),
    }
}

#[get("/dashboard/influencer/profile/edit")]
pub async fn edit_influencer_profile(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_edit_form(
        &request,
        locale.into_inner(),
        Role::Influencer,
        &user,
        &flash_messages,
        &repo,
        &catalog,
        &tera,
    )
}

#[post("/dashboard/influencer/profile/edit")]
pub async fn save_influencer_profile(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<InfluencerProfileForm>,
) -> impl Responder {
    let update = ProfileUpdate::try_from(form.clone()).map_err(ServiceError::from);
    save_profile(
        &request,
        locale.into_inner(),
        Role::Influencer,
        &user,
        update,
        |profile| profile.fill_influencer(&form),
        &repo,
        &catalog,
        &tera,
    )
}

#[get("/dashboard/company/profile/edit")]
pub async fn edit_company_profile(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_edit_form(
        &request,
        locale.into_inner(),
        Role::Company,
        &user,
        &flash_messages,
        &repo,
        &catalog,
        &tera,
    )
}

#[post("/dashboard/company/profile/edit")]
pub async fn save_company_profile(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CompanyProfileForm>,
) -> impl Responder {
    let update = ProfileUpdate::try_from(form.clone()).map_err(ServiceError::from);
    save_profile(
        &request,
        locale.into_inner(),
        Role::Company,
        &user,
        update,
        |profile| profile.fill_company(&form),
        &repo,
        &catalog,
        &tera,
    )
}
