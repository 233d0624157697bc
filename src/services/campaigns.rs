use serde::Serialize;

use crate::domain::access::{
    ensure_can_apply, ensure_can_create_campaign, ensure_can_set_campaign_status,
};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::campaign::CampaignListing;
use crate::domain::profile::Profile;
use crate::domain::types::{ApplicationId, CampaignId, CampaignStatus, Role};
use crate::dto::applications::ApplicationDto;
use crate::dto::campaigns::CampaignCardDto;
use crate::dto::categories::CategoryDto;
use crate::forms::applications::ApplyFormPayload;
use crate::forms::campaigns::{BrowseQuery, CampaignStatusFormPayload, CreateCampaignFormPayload};
use crate::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, CampaignListQuery,
    CampaignReader, CampaignWriter, CategoryReader, ProfileReader,
};

use super::{ServiceError, ServiceResult, UserMessage, load_actor, or_empty};

#[derive(Debug, Serialize)]
pub struct CampaignBrowsePage {
    pub campaigns: Vec<CampaignCardDto>,
    pub categories: Vec<CategoryDto>,
    pub search: String,
    pub category_id: Option<i32>,
    pub viewer_role: Role,
}

#[derive(Debug, Serialize)]
pub struct CampaignDetailPage {
    pub campaign: CampaignCardDto,
    pub viewer_role: Role,
    pub is_owner: bool,
    /// Influencer may still apply: campaign is active and no application yet.
    pub can_apply: bool,
    /// Statuses the owner may move the campaign to.
    pub next_statuses: Vec<CampaignStatus>,
    /// Only filled for the owning company.
    pub applications: Vec<ApplicationDto>,
}

/// Ids of campaigns the influencer already applied to.
fn applied_campaign_ids<R>(actor: &Profile, repo: &R) -> Vec<CampaignId>
where
    R: ApplicationReader,
{
    if actor.role() != Role::Influencer {
        return Vec::new();
    }
    or_empty(
        repo.list_applications(ApplicationListQuery::default().influencer(actor.id)),
        "applications",
    )
    .into_iter()
    .map(|listing| listing.application.campaign_id)
    .collect()
}

pub(crate) fn campaign_cards<R>(
    actor: &Profile,
    listings: Vec<CampaignListing>,
    repo: &R,
) -> Vec<CampaignCardDto>
where
    R: ApplicationReader,
{
    let applied = applied_campaign_ids(actor, repo);
    listings
        .into_iter()
        .map(|listing| {
            let is_applied = applied.contains(&listing.campaign.id);
            CampaignCardDto::new(listing, is_applied)
        })
        .collect()
}

/// Active campaigns, optionally narrowed by search term and category.
pub fn browse_campaigns<R>(
    user: &AuthenticatedUser,
    query: &BrowseQuery,
    repo: &R,
) -> ServiceResult<CampaignBrowsePage>
where
    R: ProfileReader + CampaignReader + ApplicationReader + CategoryReader,
{
    let actor = load_actor(user, repo)?;

    let mut list_query = CampaignListQuery::default().status(CampaignStatus::Active);
    if let Some(search) = query.search() {
        list_query = list_query.search(search);
    }
    let category_id = query.category_id();
    if let Some(category_id) = category_id {
        list_query = list_query.category(category_id);
    }

    let listings = or_empty(repo.list_campaigns(list_query), "campaigns");
    let categories = or_empty(repo.list_categories(), "categories");

    Ok(CampaignBrowsePage {
        campaigns: campaign_cards(&actor, listings, repo),
        categories: categories.into_iter().map(CategoryDto::from).collect(),
        search: query.search().unwrap_or_default().to_string(),
        category_id: category_id.map(|id| id.get()),
        viewer_role: actor.role(),
    })
}

/// Campaign detail. Inactive campaigns are only visible to their owner and
/// to influencers who applied.
pub fn show_campaign<R>(
    user: &AuthenticatedUser,
    campaign_id: CampaignId,
    repo: &R,
) -> ServiceResult<CampaignDetailPage>
where
    R: ProfileReader + CampaignReader + ApplicationReader,
{
    let actor = load_actor(user, repo)?;

    let listing = match repo.get_campaign_by_id(campaign_id) {
        Ok(Some(listing)) => listing,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load campaign {campaign_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let campaign = &listing.campaign;
    let is_owner = campaign.is_owned_by(actor.id);
    let is_applied = applied_campaign_ids(&actor, repo).contains(&campaign.id);

    if !campaign.status.accepts_applications() && !is_owner && !is_applied {
        return Err(ServiceError::NotFound);
    }

    let can_apply = ensure_can_apply(&actor, campaign, is_applied).is_ok();
    let next_statuses = if is_owner {
        [
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Completed,
        ]
        .into_iter()
        .filter(|next| campaign.status.can_transition_to(*next))
        .collect()
    } else {
        Vec::new()
    };
    let applications = if is_owner {
        or_empty(
            repo.list_applications(ApplicationListQuery::default().campaign(campaign.id)),
            "applications",
        )
        .into_iter()
        .map(ApplicationDto::from)
        .collect()
    } else {
        Vec::new()
    };

    Ok(CampaignDetailPage {
        campaign: CampaignCardDto::new(listing, is_applied),
        viewer_role: actor.role(),
        is_owner,
        can_apply,
        next_statuses,
        applications,
    })
}

/// Categories offered by the campaign form. Companies only.
pub fn new_campaign_form<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: ProfileReader + CategoryReader,
{
    let actor = load_actor(user, repo)?;
    ensure_can_create_campaign(&actor)?;

    Ok(or_empty(repo.list_categories(), "categories")
        .into_iter()
        .map(CategoryDto::from)
        .collect())
}

pub fn create_campaign<R>(
    user: &AuthenticatedUser,
    payload: CreateCampaignFormPayload,
    repo: &R,
) -> ServiceResult<CampaignId>
where
    R: ProfileReader + CategoryReader + CampaignWriter,
{
    let actor = load_actor(user, repo)?;
    ensure_can_create_campaign(&actor)?;

    if let Some(category_id) = payload.category_id {
        match repo.get_category_by_id(category_id) {
            Ok(Some(_)) => {}
            Ok(None) => return Err(ServiceError::Form(UserMessage::new("errors.unknown_category"))),
            Err(e) => {
                log::error!("Failed to load category {category_id}: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    let campaign = payload.into_new_campaign(actor.id);
    match repo.create_campaign(&campaign) {
        Ok(id) => Ok(id),
        Err(e) => {
            log::error!("Failed to create campaign: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Submits an application. The duplicate check here is advisory; the
/// storage layer rejects a concurrent second submission.
pub fn apply_to_campaign<R>(
    user: &AuthenticatedUser,
    campaign_id: CampaignId,
    payload: ApplyFormPayload,
    repo: &R,
) -> ServiceResult<ApplicationId>
where
    R: ProfileReader + CampaignReader + ApplicationReader + ApplicationWriter,
{
    let actor = load_actor(user, repo)?;

    let campaign = match repo.get_campaign_by_id(campaign_id) {
        Ok(Some(listing)) => listing.campaign,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load campaign {campaign_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let already_applied = match repo.list_applications(
        ApplicationListQuery::default()
            .campaign(campaign_id)
            .influencer(actor.id),
    ) {
        Ok(existing) => !existing.is_empty(),
        Err(e) => {
            log::error!("Failed to check existing applications: {e}");
            return Err(ServiceError::Internal);
        }
    };

    ensure_can_apply(&actor, &campaign, already_applied)?;

    let application = payload.into_new_application(campaign_id, actor.id);
    match repo.create_application(&application) {
        Ok(id) => Ok(id),
        Err(e) if e.is_constraint_violation() => Err(ServiceError::Conflict(
            UserMessage::new("errors.already_applied"),
        )),
        Err(e) => {
            log::error!("Failed to create application: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Owner pauses, resumes or completes a campaign.
pub fn set_campaign_status<R>(
    user: &AuthenticatedUser,
    campaign_id: CampaignId,
    payload: CampaignStatusFormPayload,
    repo: &R,
) -> ServiceResult<CampaignStatus>
where
    R: ProfileReader + CampaignReader + CampaignWriter,
{
    let actor = load_actor(user, repo)?;

    let campaign = match repo.get_campaign_by_id(campaign_id) {
        Ok(Some(listing)) => listing.campaign,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load campaign {campaign_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    ensure_can_set_campaign_status(&actor, &campaign, payload.status)?;

    match repo.update_campaign_status(campaign_id, campaign.status, payload.status) {
        Ok(0) => Err(ServiceError::Conflict(UserMessage::new(
            "errors.stale_campaign",
        ))),
        Ok(_) => Ok(payload.status),
        Err(e) => {
            log::error!("Failed to update campaign status: {e}");
            Err(ServiceError::Internal)
        }
    }
}
