use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{CampaignId, Locale};
use crate::forms::applications::{ApplyForm, ApplyFormPayload};
use crate::forms::campaigns::{
    BrowseQuery, CampaignStatusForm, CampaignStatusFormPayload, CreateCampaignForm,
    CreateCampaignFormPayload,
};
use crate::i18n::Catalog;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, form_error_context, form_error_message, handle_page_error,
    handle_service_error, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::campaigns::{
    apply_to_campaign as apply_to_campaign_service, browse_campaigns as browse_campaigns_service,
    create_campaign as create_campaign_service, new_campaign_form as new_campaign_form_service,
    set_campaign_status as set_campaign_status_service, show_campaign as show_campaign_service,
};

#[get("/campaigns/browse")]
pub async fn browse_campaigns(
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
    match browse_campaigns_service(&user, &query, repo.get_ref()) {
        Ok(page) => {
            let mut context =
                base_context(&request, &flash_messages, Some(&user), "campaigns", locale);
            context.insert("page", &page);
            render_template(&tera, "campaigns/browse.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[get("/campaigns/create")]
pub async fn show_create_campaign(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = locale.into_inner();
    match new_campaign_form_service(&user, repo.get_ref()) {
        Ok(categories) => {
            let mut context =
                base_context(&request, &flash_messages, Some(&user), "campaigns", locale);
            context.insert("categories", &categories);
            render_template(&tera, "campaigns/create.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[post("/campaigns")]
pub async fn create_campaign(
    request: HttpRequest,
    locale: web::Path<Locale>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CreateCampaignForm>,
) -> impl Responder {
    let locale = locale.into_inner();
    let back = format!("/{locale}/campaigns/create");

    let result = CreateCampaignFormPayload::try_from(form.clone())
        .map_err(ServiceError::from)
        .and_then(|payload| create_campaign_service(&user, payload, repo.get_ref()));

    let err = match result {
        Ok(id) => {
            FlashMessage::success(catalog.translate(locale, "flash.campaign_created")).send();
            return redirect(&format!("/{locale}/campaigns/{id}"));
        }
        Err(err) => err,
    };
    let Some(message) = form_error_message(&err, &catalog, locale) else {
        return handle_service_error(err, &catalog, locale, &back);
    };
    match new_campaign_form_service(&user, repo.get_ref()) {
        Ok(categories) => {
            let mut context =
                form_error_context(&request, message, Some(&user), "campaigns", locale);
            context.insert("categories", &categories);
            context.insert("form", &form);
            render_template(&tera, "campaigns/create.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[get("/campaigns/{campaign_id}")]
pub async fn show_campaign(
    request: HttpRequest,
    path: web::Path<(Locale, i32)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (locale, campaign_id) = path.into_inner();
    let Ok(campaign_id) = CampaignId::new(campaign_id) else {
        return handle_page_error(ServiceError::NotFound, &catalog, locale);
    };

    match show_campaign_service(&user, campaign_id, repo.get_ref()) {
        Ok(page) => {
            let mut context =
                base_context(&request, &flash_messages, Some(&user), "campaigns", locale);
            context.insert("page", &page);
            render_template(&tera, "campaigns/show.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[post("/campaigns/{campaign_id}/apply")]
pub async fn apply_to_campaign(
    request: HttpRequest,
    path: web::Path<(Locale, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ApplyForm>,
) -> impl Responder {
    let (locale, campaign_id) = path.into_inner();
    let back = format!("/{locale}/campaigns/{campaign_id}");

    let campaign_id = match CampaignId::new(campaign_id) {
        Ok(id) => id,
        Err(e) => {
            let browse = format!("/{locale}/campaigns/browse");
            return handle_service_error(e.into(), &catalog, locale, &browse);
        }
    };

    let result = ApplyFormPayload::try_from(form.clone())
        .map_err(ServiceError::from)
        .and_then(|payload| {
            apply_to_campaign_service(&user, campaign_id, payload, repo.get_ref())
        });

    let err = match result {
        Ok(_) => {
            FlashMessage::success(catalog.translate(locale, "flash.application_submitted"))
                .send();
            return redirect(&back);
        }
        Err(err) => err,
    };
    let Some(message) = form_error_message(&err, &catalog, locale) else {
        return handle_service_error(err, &catalog, locale, &back);
    };
    match show_campaign_service(&user, campaign_id, repo.get_ref()) {
        Ok(page) => {
            let mut context =
                form_error_context(&request, message, Some(&user), "campaigns", locale);
            context.insert("page", &page);
            context.insert("form", &form);
            render_template(&tera, "campaigns/show.html", &context)
        }
        Err(err) => handle_page_error(err, &catalog, locale),
    }
}

#[post("/campaigns/{campaign_id}/status")]
pub async fn set_campaign_status(
    path: web::Path<(Locale, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    catalog: web::Data<Catalog>,
    web::Form(form): web::Form<CampaignStatusForm>,
) -> impl Responder {
    let (locale, campaign_id) = path.into_inner();
    let back = format!("/{locale}/campaigns/{campaign_id}");

    let campaign_id = match CampaignId::new(campaign_id) {
        Ok(id) => id,
        Err(e) => {
            let dashboard = format!("/{locale}/dashboard");
            return handle_service_error(e.into(), &catalog, locale, &dashboard);
        }
    };

    let payload: CampaignStatusFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return handle_service_error(ServiceError::from(e), &catalog, locale, &back),
    };

    match set_campaign_status_service(&user, campaign_id, payload, repo.get_ref()) {
        Ok(_) => {
            FlashMessage::success(catalog.translate(locale, "flash.campaign_status_changed"))
                .send();
            redirect(&back)
        }
        Err(err) => handle_service_error(err, &catalog, locale, &back),
    }
}
