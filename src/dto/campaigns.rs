use serde::Serialize;

use crate::domain::campaign::CampaignListing;

/// Campaign card shown on browse pages, dashboards and the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignCardDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub requirements: String,
    /// Formatted budget, e.g. `$1,000 - $5,000`.
    pub budget: String,
    pub status: &'static str,
    pub company_name: String,
    pub category: Option<String>,
    pub created_at: String,
    /// Whether the viewing influencer already applied. Advisory only.
    pub is_applied: bool,
}

impl CampaignCardDto {
    pub fn new(listing: CampaignListing, is_applied: bool) -> Self {
        let CampaignListing {
            campaign,
            company_name,
            category,
        } = listing;
        Self {
            id: campaign.id.get(),
            budget: campaign.budget.format(),
            status: campaign.status.as_str(),
            created_at: campaign.created_at.format("%Y-%m-%d").to_string(),
            title: campaign.title.into_inner(),
            description: campaign.description.into_inner(),
            requirements: campaign.requirements.into_inner(),
            company_name: company_name.unwrap_or_default(),
            category: category.map(|c| c.name.into_inner()),
            is_applied,
        }
    }
}

impl From<CampaignListing> for CampaignCardDto {
    fn from(value: CampaignListing) -> Self {
        Self::new(value, false)
    }
}
