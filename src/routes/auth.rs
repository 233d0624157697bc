use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{Locale, Role};
use crate::forms::auth::{LoginForm, LoginFormPayload, SignupForm, SignupFormPayload};
use crate::i18n::Catalog;
use crate::identity::log_in;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, dashboard_path, form_error_context, form_error_message, handle_service_error,
    redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::auth::{sign_in as sign_in_service, sign_up as sign_up_service};

/// Renders `template` again with the rejected input and `message`.
fn form_page<F: Serialize>(
    request: &HttpRequest,
    tera: &Tera,
    template: &str,
    current_page: &str,
    locale: Locale,
    message: String,
    form: &F,
) -> HttpResponse {
    let mut context = form_error_context(request, message, None, current_page, locale);
    context.insert("form", form);
    render_template(tera, template, &context)
}

/// Starts the session for a freshly authenticated user. Failing to attach
/// the identity returns to `back` with a generic error.
fn start_session(
    request: &HttpRequest,
    user: &AuthenticatedUser,
    role: Role,
    catalog: &Catalog,
    locale: Locale,
    flash_key: &str,
    back: &str,
) -> HttpResponse {
    if let Err(e) = log_in(request, user) {
        log::error!("Failed to attach identity: {e}");
        return handle_service_error(ServiceError::Internal, catalog, locale, back);
    }
    FlashMessage::success(catalog.translate(locale, flash_key)).send();
    redirect(&dashboard_path(locale, role))
}

#[get("/login")]
pub async fn show_login(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    if user.is_some() {
        return redirect(&format!("/{locale}/dashboard"));
    }
    let context = base_context(&request, &flash_messages, None, "login", locale);
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    locale: web::Path<Locale>,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let locale = locale.into_inner();
    let back = format!("/{locale}/login");

    let result = LoginFormPayload::try_from(form.clone())
        .map_err(ServiceError::from)
        .and_then(|payload| sign_in_service(payload, repo.get_ref()));

    let message = match result {
        Ok((user, role)) => {
            return start_session(&request, &user, role, &catalog, locale, "flash.signed_in", &back);
        }
        Err(ServiceError::Unauthorized) => catalog.translate(locale, "flash.invalid_credentials"),
        Err(err) => match form_error_message(&err, &catalog, locale) {
            Some(message) => message,
            None => return handle_service_error(err, &catalog, locale, &back),
        },
    };
    form_page(&request, &tera, "auth/login.html", "login", locale, message, &form)
}

#[get("/signup")]
pub async fn show_signup(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    if user.is_some() {
        return redirect(&format!("/{locale}/dashboard"));
    }
    let context = base_context(&request, &flash_messages, None, "signup", locale);
    render_template(&tera, "auth/signup.html", &context)
}

#[post("/signup")]
pub async fn signup(
    request: HttpRequest,
    locale: web::Path<Locale>,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    let locale = locale.into_inner();
    let back = format!("/{locale}/signup");

    let result = SignupFormPayload::try_from(form.clone())
        .map_err(ServiceError::from)
        .and_then(|payload| sign_up_service(payload, repo.get_ref()));

    match result {
        Ok((user, role)) => {
            start_session(&request, &user, role, &catalog, locale, "flash.signed_up", &back)
        }
        Err(err) => match form_error_message(&err, &catalog, locale) {
            Some(message) => {
                form_page(&request, &tera, "auth/signup.html", "signup", locale, message, &form)
            }
            None => handle_service_error(err, &catalog, locale, &back),
        },
    }
}

#[post("/logout")]
pub async fn logout(
    locale: web::Path<Locale>,
    identity: Option<Identity>,
    catalog: web::Data<Catalog>,
) -> impl Responder {
    let locale = locale.into_inner();
    if let Some(identity) = identity {
        identity.logout();
    }
    FlashMessage::info(catalog.translate(locale, "flash.signed_out")).send();
    redirect(&format!("/{locale}/"))
}
