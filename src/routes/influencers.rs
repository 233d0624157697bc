use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Locale;
use crate::forms::campaigns::BrowseQuery;
use crate::i18n::Catalog;
use crate::repository::DieselRepository;
use crate::routes::{base_context, handle_page_error, render_template};
use crate::services::influencers::browse_influencers as browse_influencers_service;

#[get("/influencers/browse")]
pub async fn browse_influencers(
    request: HttpRequest,
    locale: web::Path<Locale>,
    query: web::Query<BrowseQuery>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    match browse_influencers_service(&user, &query, repo.get_ref()) {
        Ok(page) => {
            let mut context =
                base_context(&request, &flash_messages, Some(&user), "influencers", locale);
            context.insert("page", &page);
            render_template(&tera, "influencers/browse.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}
