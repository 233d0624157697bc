use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CompanyName, Email, EngagementRate, FollowerCount, FullName, ProfileId, Role,
    WebUrl,
};

/// Identity record specialised by marketplace side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub email: Email,
    pub full_name: FullName,
    pub avatar_url: Option<WebUrl>,
    pub bio: Option<String>,
    pub website: Option<WebUrl>,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub kind: ProfileKind,
}

/// Role-specific part of a profile. The variant is the role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ProfileKind {
    Influencer(InfluencerDetails),
    Company(CompanyDetails),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InfluencerDetails {
    pub followers_count: Option<FollowerCount>,
    pub engagement_rate: Option<EngagementRate>,
    pub niche: Option<String>,
    pub category_ids: Vec<CategoryId>,
    pub instagram_url: Option<WebUrl>,
    pub youtube_url: Option<WebUrl>,
    pub tiktok_url: Option<WebUrl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyDetails {
    pub company_name: CompanyName,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub trustpilot_url: Option<WebUrl>,
}

impl ProfileKind {
    pub const fn role(&self) -> Role {
        match self {
            Self::Influencer(_) => Role::Influencer,
            Self::Company(_) => Role::Company,
        }
    }
}

impl Profile {
    pub const fn role(&self) -> Role {
        self.kind.role()
    }

    pub fn as_influencer(&self) -> Option<&InfluencerDetails> {
        match &self.kind {
            ProfileKind::Influencer(details) => Some(details),
            ProfileKind::Company(_) => None,
        }
    }

    pub fn as_company(&self) -> Option<&CompanyDetails> {
        match &self.kind {
            ProfileKind::Company(details) => Some(details),
            ProfileKind::Influencer(_) => None,
        }
    }

    /// Name shown on cards and greetings: company name for companies.
    pub fn display_name(&self) -> &str {
        match &self.kind {
            ProfileKind::Influencer(_) => self.full_name.as_str(),
            ProfileKind::Company(details) => details.company_name.as_str(),
        }
    }
}

/// Profile created together with a user account at signup.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub email: Email,
    pub full_name: FullName,
    pub kind: NewProfileKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewProfileKind {
    Influencer,
    Company { company_name: CompanyName },
}

impl NewProfile {
    pub const fn role(&self) -> Role {
        match self.kind {
            NewProfileKind::Influencer => Role::Influencer,
            NewProfileKind::Company { .. } => Role::Company,
        }
    }
}

/// Fields an owner may change on their profile. Only the fields of the
/// profile's own role are ever written.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Influencer(InfluencerProfileUpdate),
    Company(CompanyProfileUpdate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfluencerProfileUpdate {
    pub full_name: FullName,
    pub niche: Option<String>,
    pub bio: Option<String>,
    pub website: Option<WebUrl>,
    pub location: Option<String>,
    pub avatar_url: Option<WebUrl>,
    pub instagram_url: Option<WebUrl>,
    pub youtube_url: Option<WebUrl>,
    pub tiktok_url: Option<WebUrl>,
    pub followers_count: Option<FollowerCount>,
    pub engagement_rate: Option<EngagementRate>,
    pub category_ids: Vec<CategoryId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyProfileUpdate {
    pub company_name: CompanyName,
    pub description: Option<String>,
    pub website: Option<WebUrl>,
    pub trustpilot_url: Option<WebUrl>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdate {
    pub const fn role(&self) -> Role {
        match self {
            Self::Influencer(_) => Role::Influencer,
            Self::Company(_) => Role::Company,
        }
    }
}

/// Compact audience size for influencer cards: `245000 -> "245.0K"`.
pub fn format_follower_count(count: Option<FollowerCount>) -> String {
    let count = match count {
        Some(count) if count.get() > 0 => count.get(),
        _ => return "N/A".to_string(),
    };
    if count >= 1_000_000 {
        format!("{:.1}M", f64::from(count) / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", f64::from(count) / 1_000.0)
    } else {
        count.to_string()
    }
}
