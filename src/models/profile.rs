use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{
    CompanyDetails, CompanyProfileUpdate, InfluencerDetails, InfluencerProfileUpdate,
    NewProfile as DomainNewProfile, NewProfileKind, Profile as DomainProfile, ProfileKind,
};
use crate::domain::types::{
    CategoryId, CompanyName, Email, EngagementRate, FollowerCount, FullName, ProfileId, Role,
    TypeConstraintError, WebUrl,
};

/// Diesel model representing the `profiles` table.
///
/// The table is wide: it carries the columns of both roles and the `role`
/// column decides which of them are meaningful.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub followers_count: Option<i32>,
    pub engagement_rate: Option<f64>,
    pub niche: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub trustpilot_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub company_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns an influencer may change. Company columns are not listed, so an
/// influencer update can never touch them.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::profiles, treat_none_as_null = true)]
pub struct InfluencerChangeset {
    pub full_name: String,
    pub niche: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub followers_count: Option<i32>,
    pub engagement_rate: Option<f64>,
    pub updated_at: NaiveDateTime,
}

/// Columns a company may change.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::profiles, treat_none_as_null = true)]
pub struct CompanyChangeset {
    pub company_name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub trustpilot_url: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub location: Option<String>,
    pub updated_at: NaiveDateTime,
}

fn parse_url(value: Option<String>) -> Result<Option<WebUrl>, TypeConstraintError> {
    value.map(WebUrl::new).transpose()
}

impl Profile {
    /// Converts the row into the domain profile, reading only the columns
    /// that belong to the stored role.
    pub fn into_domain(
        self,
        category_ids: Vec<CategoryId>,
    ) -> Result<DomainProfile, TypeConstraintError> {
        let kind = match Role::try_from(self.role.as_str())? {
            Role::Influencer => ProfileKind::Influencer(InfluencerDetails {
                followers_count: self.followers_count.map(FollowerCount::new).transpose()?,
                engagement_rate: self.engagement_rate.map(EngagementRate::new).transpose()?,
                niche: self.niche,
                category_ids,
                instagram_url: parse_url(self.instagram_url)?,
                youtube_url: parse_url(self.youtube_url)?,
                tiktok_url: parse_url(self.tiktok_url)?,
            }),
            Role::Company => ProfileKind::Company(CompanyDetails {
                company_name: CompanyName::new(
                    self.company_name
                        .unwrap_or_else(|| self.full_name.clone()),
                )?,
                industry: self.industry,
                company_size: self.company_size,
                description: self.description,
                trustpilot_url: parse_url(self.trustpilot_url)?,
            }),
        };

        Ok(DomainProfile {
            id: ProfileId::new(self.id)?,
            email: Email::new(self.email)?,
            full_name: FullName::new(self.full_name)?,
            avatar_url: parse_url(self.avatar_url)?,
            bio: self.bio,
            website: parse_url(self.website)?,
            location: self.location,
            created_at: self.created_at,
            updated_at: self.updated_at,
            kind,
        })
    }
}

impl NewProfile {
    pub fn from_domain(id: ProfileId, profile: DomainNewProfile, now: NaiveDateTime) -> Self {
        let role = profile.role().as_str().to_string();
        let company_name = match profile.kind {
            NewProfileKind::Influencer => None,
            NewProfileKind::Company { company_name } => Some(company_name.into_inner()),
        };
        Self {
            id: id.get(),
            email: profile.email.into_inner(),
            full_name: profile.full_name.into_inner(),
            role,
            company_name,
            created_at: now,
            updated_at: now,
        }
    }
}

impl InfluencerChangeset {
    pub fn new(update: &InfluencerProfileUpdate, now: NaiveDateTime) -> Self {
        Self {
            full_name: update.full_name.as_str().to_string(),
            niche: update.niche.clone(),
            bio: update.bio.clone(),
            website: update.website.as_ref().map(|u| u.as_str().to_string()),
            location: update.location.clone(),
            avatar_url: update.avatar_url.as_ref().map(|u| u.as_str().to_string()),
            instagram_url: update.instagram_url.as_ref().map(|u| u.as_str().to_string()),
            youtube_url: update.youtube_url.as_ref().map(|u| u.as_str().to_string()),
            tiktok_url: update.tiktok_url.as_ref().map(|u| u.as_str().to_string()),
            followers_count: update.followers_count.map(FollowerCount::get),
            engagement_rate: update.engagement_rate.map(EngagementRate::get),
            updated_at: now,
        }
    }
}

impl CompanyChangeset {
    pub fn new(update: &CompanyProfileUpdate, now: NaiveDateTime) -> Self {
        Self {
            company_name: update.company_name.as_str().to_string(),
            description: update.description.clone(),
            website: update.website.as_ref().map(|u| u.as_str().to_string()),
            trustpilot_url: update.trustpilot_url.as_ref().map(|u| u.as_str().to_string()),
            industry: update.industry.clone(),
            company_size: update.company_size.clone(),
            location: update.location.clone(),
            updated_at: now,
        }
    }
}
