use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::campaign::{BudgetRange, NewCampaign};
use crate::domain::types::{
    BudgetAmount, CampaignDescription, CampaignRequirements, CampaignStatus, CampaignTitle,
    CategoryId, ProfileId, TypeConstraintError,
};
use crate::forms::invalid_fields;

/// Parses an optional id coming from a `<select>`, where "" means none.
pub(crate) fn parse_optional_id(value: Option<&str>) -> Result<Option<CategoryId>, TypeConstraintError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => {
            let id: i32 = raw
                .parse()
                .map_err(|_| TypeConstraintError::InvalidValue(format!("category: {raw}")))?;
            CategoryId::new(id).map(Some)
        }
    }
}

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct CreateCampaignForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub requirements: String,
    #[validate(range(min = 0))]
    pub budget_min: i64,
    #[validate(range(min = 0))]
    pub budget_max: i64,
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCampaignFormPayload {
    pub title: CampaignTitle,
    pub description: CampaignDescription,
    pub requirements: CampaignRequirements,
    pub budget: BudgetRange,
    pub category_id: Option<CategoryId>,
}

impl CreateCampaignFormPayload {
    pub fn into_new_campaign(self, company_id: ProfileId) -> NewCampaign {
        let now = Utc::now().naive_utc();
        NewCampaign {
            company_id,
            category_id: self.category_id,
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            budget: self.budget,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateCampaignFormError {
    #[error("Campaign form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Campaign form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for CreateCampaignFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<CreateCampaignForm> for CreateCampaignFormPayload {
    type Error = CreateCampaignFormError;

    fn try_from(value: CreateCampaignForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: CampaignTitle::new(value.title)?,
            description: CampaignDescription::new(value.description)?,
            requirements: CampaignRequirements::new(value.requirements)?,
            budget: BudgetRange::new(
                BudgetAmount::new(value.budget_min)?,
                BudgetAmount::new(value.budget_max)?,
            )?,
            category_id: parse_optional_id(value.category_id.as_deref())?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct CampaignStatusForm {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignStatusFormPayload {
    pub status: CampaignStatus,
}

#[derive(Debug, Error)]
pub enum CampaignStatusFormError {
    #[error("Campaign status form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Campaign status form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for CampaignStatusFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<CampaignStatusForm> for CampaignStatusFormPayload {
    type Error = CampaignStatusFormError;

    fn try_from(value: CampaignStatusForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            status: CampaignStatus::try_from(value.status.as_str())?,
        })
    }
}

/// Query string of the browse pages: `?search=&category=`.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl BrowseQuery {
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Selected category. Unparseable values are treated as "all categories".
    pub fn category_id(&self) -> Option<CategoryId> {
        parse_optional_id(self.category.as_deref()).ok().flatten()
    }
}
