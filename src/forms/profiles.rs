use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::profile::{CompanyProfileUpdate, InfluencerProfileUpdate, ProfileUpdate};
use crate::domain::types::{
    CategoryId, CompanyName, EngagementRate, FollowerCount, FullName, TypeConstraintError,
    WebUrl, optional_text,
};
use crate::forms::invalid_fields;

/// Checkbox name prefix for category tags, e.g. `category_3=on`.
pub const CATEGORY_FIELD_PREFIX: &str = "category_";

fn optional_url(value: Option<String>) -> Result<Option<WebUrl>, TypeConstraintError> {
    optional_text(value).map(WebUrl::new).transpose()
}

fn optional_number<T: std::str::FromStr>(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<T>, TypeConstraintError> {
    optional_text(value)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| TypeConstraintError::InvalidValue(format!("{field}: {raw}")))
        })
        .transpose()
}

/// Collects checked `category_<id>` boxes into sorted, unique ids.
fn selected_categories(fields: &HashMap<String, String>) -> Result<Vec<CategoryId>, TypeConstraintError> {
    let mut ids = Vec::new();
    for key in fields.keys() {
        let Some(raw) = key.strip_prefix(CATEGORY_FIELD_PREFIX) else {
            continue;
        };
        let id: i32 = raw
            .parse()
            .map_err(|_| TypeConstraintError::InvalidValue(format!("category: {raw}")))?;
        ids.push(CategoryId::new(id)?);
    }
    ids.sort();
    ids.dedup();
    Ok(ids)
}

#[derive(Clone, Deserialize, Validate, Default)]
pub struct InfluencerProfileForm {
    #[validate(length(min = 1))]
    pub full_name: String,
    pub niche: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub followers_count: Option<String>,
    pub engagement_rate: Option<String>,
    /// Remaining fields; checked category boxes arrive here.
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum InfluencerProfileFormError {
    #[error("Profile form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Profile form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for InfluencerProfileFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<InfluencerProfileForm> for ProfileUpdate {
    type Error = InfluencerProfileFormError;

    fn try_from(value: InfluencerProfileForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let followers_count = optional_number::<i32>(value.followers_count, "followers count")?
            .map(FollowerCount::new)
            .transpose()?;
        let engagement_rate = optional_number::<f64>(value.engagement_rate, "engagement rate")?
            .map(EngagementRate::new)
            .transpose()?;

        Ok(ProfileUpdate::Influencer(InfluencerProfileUpdate {
            full_name: FullName::new(value.full_name)?,
            niche: optional_text(value.niche),
            bio: optional_text(value.bio),
            website: optional_url(value.website)?,
            location: optional_text(value.location),
            avatar_url: optional_url(value.avatar_url)?,
            instagram_url: optional_url(value.instagram_url)?,
            youtube_url: optional_url(value.youtube_url)?,
            tiktok_url: optional_url(value.tiktok_url)?,
            followers_count,
            engagement_rate,
            category_ids: selected_categories(&value.extra)?,
        }))
    }
}

#[derive(Clone, Deserialize, Validate, Default)]
pub struct CompanyProfileForm {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub website: Option<String>,
    pub trustpilot_url: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Error)]
pub enum CompanyProfileFormError {
    #[error("Company profile form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Company profile form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for CompanyProfileFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<CompanyProfileForm> for ProfileUpdate {
    type Error = CompanyProfileFormError;

    fn try_from(value: CompanyProfileForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(ProfileUpdate::Company(CompanyProfileUpdate {
            company_name: CompanyName::new(value.company_name)?,
            description: optional_text(value.description),
            website: optional_url(value.website)?,
            trustpilot_url: optional_url(value.trustpilot_url)?,
            industry: optional_text(value.industry),
            company_size: optional_text(value.company_size),
            location: optional_text(value.location),
        }))
    }
}
