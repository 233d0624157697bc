use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{ApplicationStatus, CampaignStatus, Role};
use crate::dto::applications::ApplicationDto;
use crate::dto::campaigns::CampaignCardDto;
use crate::dto::profiles::InfluencerCardDto;
use crate::repository::{
    ApplicationListQuery, ApplicationReader, CampaignListQuery, CampaignReader, CategoryReader,
    ProfileListQuery, ProfileReader,
};

use super::campaigns::campaign_cards;
use super::{ServiceError, ServiceResult, load_actor, or_empty};

/// Influencers shown on the company dashboard.
pub const TOP_INFLUENCERS: usize = 6;

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ApplicationStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl ApplicationStats {
    fn count(applications: &[ApplicationDto]) -> Self {
        let by_status =
            |status: ApplicationStatus| applications.iter().filter(|a| a.status == status.as_str()).count();
        Self {
            total: applications.len(),
            pending: by_status(ApplicationStatus::Pending),
            accepted: by_status(ApplicationStatus::Accepted),
            rejected: by_status(ApplicationStatus::Rejected),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InfluencerDashboard {
    pub display_name: String,
    pub campaigns: Vec<CampaignCardDto>,
    pub applications: Vec<ApplicationDto>,
    pub stats: ApplicationStats,
}

#[derive(Debug, Serialize)]
pub struct CompanyDashboard {
    pub display_name: String,
    pub campaigns: Vec<CampaignCardDto>,
    pub applications: Vec<ApplicationDto>,
    pub influencers: Vec<InfluencerCardDto>,
    pub stats: ApplicationStats,
    pub active_campaigns: usize,
}

/// Role of the signed-in actor, used to pick the dashboard.
pub fn dashboard_role<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Role>
where
    R: ProfileReader,
{
    Ok(load_actor(user, repo)?.role())
}

/// Active campaigns to browse and the influencer's own applications.
pub fn influencer_dashboard<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<InfluencerDashboard>
where
    R: ProfileReader + CampaignReader + ApplicationReader,
{
    let actor = load_actor(user, repo)?;
    if actor.role() != Role::Influencer {
        return Err(ServiceError::Forbidden(
            "this dashboard is for influencers".to_string(),
        ));
    }

    let listings = or_empty(
        repo.list_campaigns(CampaignListQuery::default().status(CampaignStatus::Active)),
        "campaigns",
    );
    let applications: Vec<ApplicationDto> = or_empty(
        repo.list_applications(ApplicationListQuery::default().influencer(actor.id)),
        "applications",
    )
    .into_iter()
    .map(ApplicationDto::from)
    .collect();

    Ok(InfluencerDashboard {
        display_name: actor.display_name().to_string(),
        campaigns: campaign_cards(&actor, listings, repo),
        stats: ApplicationStats::count(&applications),
        applications,
    })
}

/// The company's campaigns, applications to them and the largest
/// influencers by audience.
pub fn company_dashboard<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<CompanyDashboard>
where
    R: ProfileReader + CampaignReader + ApplicationReader + CategoryReader,
{
    let actor = load_actor(user, repo)?;
    if actor.role() != Role::Company {
        return Err(ServiceError::Forbidden(
            "this dashboard is for companies".to_string(),
        ));
    }

    let campaigns: Vec<CampaignCardDto> = or_empty(
        repo.list_campaigns(CampaignListQuery::default().company(actor.id)),
        "campaigns",
    )
    .into_iter()
    .map(CampaignCardDto::from)
    .collect();

    let applications: Vec<ApplicationDto> = or_empty(
        repo.list_applications(ApplicationListQuery::default().company(actor.id)),
        "applications",
    )
    .into_iter()
    .map(ApplicationDto::from)
    .collect();

    let categories = or_empty(repo.list_categories(), "categories");
    let influencers = or_empty(
        repo.list_profiles(
            ProfileListQuery::default()
                .role(Role::Influencer)
                .with_followers()
                .limit(TOP_INFLUENCERS),
        ),
        "influencers",
    )
    .iter()
    .filter_map(|profile| InfluencerCardDto::new(profile, &categories))
    .collect();

    Ok(CompanyDashboard {
        display_name: actor.display_name().to_string(),
        active_campaigns: campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active.as_str())
            .count(),
        stats: ApplicationStats::count(&applications),
        campaigns,
        applications,
        influencers,
    })
}
