use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{Locale, Role};
use crate::i18n::Catalog;
use crate::services::ServiceError;

pub mod applications;
pub mod auth;
pub mod campaigns;
pub mod dashboard;
pub mod influencers;
pub mod main;
pub mod profiles;

/// Registers every page under `/` and `/{locale}`. Static files are mounted
/// by the caller before this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error_handler))
        .service(main::root)
        .service(
            web::scope("/{locale}")
                .service(auth::show_login)
                .service(auth::login)
                .service(auth::show_signup)
                .service(auth::signup)
                .service(auth::logout)
                .service(dashboard::dashboard)
                .service(dashboard::influencer_dashboard)
                .service(dashboard::company_dashboard)
                .service(profiles::edit_influencer_profile)
                .service(profiles::save_influencer_profile)
                .service(profiles::edit_company_profile)
                .service(profiles::save_company_profile)
                // Literal campaign paths before `/campaigns/{campaign_id}`.
                .service(campaigns::browse_campaigns)
                .service(campaigns::show_create_campaign)
                .service(campaigns::create_campaign)
                .service(campaigns::show_campaign)
                .service(campaigns::apply_to_campaign)
                .service(campaigns::set_campaign_status)
                .service(applications::set_application_status)
                .service(influencers::browse_influencers)
                .service(web::resource(["", "/"]).route(web::get().to(main::landing))),
        );
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Locale from the `/{locale}` path segment, else the configured default.
pub(crate) fn request_locale(req: &HttpRequest) -> Locale {
    req.match_info()
        .get("locale")
        .and_then(|raw| Locale::try_from(raw).ok())
        .or_else(|| req.app_data::<web::Data<Locale>>().map(|l| *l.get_ref()))
        .unwrap_or_default()
}

/// Request path with the leading locale segment removed, used by the
/// language switcher to stay on the same page.
fn path_without_locale(path: &str) -> &str {
    let rest = path.trim_start_matches('/');
    match rest.split_once('/') {
        Some((first, tail)) if Locale::try_from(first).is_ok() => {
            &path[path.len() - tail.len() - 1..]
        }
        _ if Locale::try_from(rest).is_ok() => "/",
        _ => path,
    }
}

/// Path and query of a `Referer` value. Only the path is kept so the
/// redirect never leaves the site.
fn referer_path(referer: &str) -> Option<&str> {
    let without_scheme = referer.split_once("://").map_or(referer, |(_, rest)| rest);
    without_scheme.find('/').map(|start| &without_scheme[start..])
}

fn page_context(
    request: &HttpRequest,
    alerts: &[(String, &str)],
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    locale: Locale,
) -> Context {
    let locales = Locale::ALL
        .iter()
        .map(|l| (l.as_str(), l.label()))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context.insert("current_path", path_without_locale(request.path()));
    context.insert("locale", &locale);
    context.insert("locales", &locales);
    context
}

pub fn base_context(
    request: &HttpRequest,
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    locale: Locale,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    page_context(request, &alerts, user, current_page, locale)
}

/// Context for a form page rendered again after a rejected submission.
pub fn form_error_context(
    request: &HttpRequest,
    message: String,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    locale: Locale,
) -> Context {
    let alerts = [(message, alert_level_to_str(&Level::Error))];
    page_context(request, &alerts, user, current_page, locale)
}

pub fn dashboard_path(locale: Locale, role: Role) -> String {
    format!("/{locale}/dashboard/{role}")
}

/// Text for errors the user can fix by editing the form and submitting it
/// again. Other errors go through [`handle_service_error`].
pub fn form_error_message(err: &ServiceError, catalog: &Catalog, locale: Locale) -> Option<String> {
    match err {
        ServiceError::Conflict(message)
        | ServiceError::Form(message)
        | ServiceError::TypeConstraint(message) => Some(message.render(catalog, locale)),
        _ => None,
    }
}

/// Maps a failed mutation to a flash message and a redirect. `back` is the
/// page the form was submitted from.
pub fn handle_service_error(
    err: ServiceError,
    catalog: &Catalog,
    locale: Locale,
    back: &str,
) -> HttpResponse {
    match err.user_message() {
        Some(message) => {
            FlashMessage::error(message.render(catalog, locale)).send();
            redirect(back)
        }
        None if err == ServiceError::Unauthorized => redirect(&format!("/{locale}/login")),
        None => {
            log::info!("Refused action: {err}");
            FlashMessage::error(catalog.translate(locale, "flash.forbidden")).send();
            redirect(&format!("/{locale}/dashboard"))
        }
    }
}

/// Maps a failed page load. Missing records and internal failures answer
/// with a bare status instead of redirecting.
pub fn handle_page_error(err: ServiceError, catalog: &Catalog, locale: Locale) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
        other => handle_service_error(other, catalog, locale, &format!("/{locale}/dashboard")),
    }
}

/// A form body that cannot be decoded, such as text in a number field,
/// returns to the submitting page with a flash message.
fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    log::info!("Rejected form body for {}: {err}", req.path());
    let locale = request_locale(req);
    if let Some(catalog) = req.app_data::<web::Data<Catalog>>() {
        FlashMessage::error(catalog.translate(locale, "flash.malformed_form")).send();
    }
    let back = req
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(referer_path)
        .map_or_else(|| format!("/{locale}/dashboard"), str::to_string);
    InternalError::from_response(err, redirect(&back)).into()
}
