use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::campaign::{BudgetRange, Campaign as DomainCampaign, NewCampaign as DomainNewCampaign};
use crate::domain::types::{
    BudgetAmount, CampaignDescription, CampaignRequirements, CampaignStatus, CampaignTitle,
    TypeConstraintError,
};

/// Diesel model representing the `campaigns` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct Campaign {
    pub id: i32,
    pub company_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub budget_min: i64,
    pub budget_max: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct NewCampaign {
    pub company_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub budget_min: i64,
    pub budget_max: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Campaign> for DomainCampaign {
    type Error = TypeConstraintError;

    fn try_from(campaign: Campaign) -> Result<Self, Self::Error> {
        Ok(Self {
            id: campaign.id.try_into()?,
            company_id: campaign.company_id.try_into()?,
            category_id: campaign.category_id.map(TryInto::try_into).transpose()?,
            title: CampaignTitle::new(campaign.title)?,
            description: CampaignDescription::new(campaign.description)?,
            requirements: CampaignRequirements::new(campaign.requirements)?,
            budget: BudgetRange::from_stored(
                BudgetAmount::new(campaign.budget_min)?,
                BudgetAmount::new(campaign.budget_max)?,
            ),
            status: CampaignStatus::try_from(campaign.status)?,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        })
    }
}

impl From<DomainNewCampaign> for NewCampaign {
    fn from(campaign: DomainNewCampaign) -> Self {
        Self {
            company_id: campaign.company_id.get(),
            category_id: campaign.category_id.map(|id| id.get()),
            title: campaign.title.into_inner(),
            description: campaign.description.into_inner(),
            requirements: campaign.requirements.into_inner(),
            budget_min: campaign.budget.min().get(),
            budget_max: campaign.budget.max().get(),
            status: CampaignStatus::Active.as_str().to_string(),
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }
    }
}
