use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Locale;
use crate::routes::{base_context, redirect, render_template};

/// `/` sends visitors to the default locale.
#[get("/")]
pub async fn root(default_locale: web::Data<Locale>) -> impl Responder {
    redirect(&format!("/{}/", default_locale.get_ref()))
}

/// Landing page for `/{locale}` and `/{locale}/`.
pub async fn landing(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    let context = base_context(&request, &flash_messages, user.as_ref(), "index", locale);
    render_template(&tera, "main/index.html", &context)
}
