use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::profile::{Profile, ProfileKind, format_follower_count};
use crate::forms::profiles::{CATEGORY_FIELD_PREFIX, CompanyProfileForm, InfluencerProfileForm};

/// Number of category tags shown on an influencer card.
const CARD_CATEGORY_LIMIT: usize = 3;

/// Influencer card for the directory and the company dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluencerCardDto {
    pub id: i32,
    pub full_name: String,
    /// Uppercase first letter, shown when there is no avatar.
    pub initial: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub niche: Option<String>,
    pub location: Option<String>,
    pub followers: String,
    pub engagement_rate: Option<String>,
    pub categories: Vec<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub tiktok_url: Option<String>,
}

impl InfluencerCardDto {
    /// Builds the card, resolving category ids against `categories`.
    /// Returns `None` for company profiles.
    pub fn new(profile: &Profile, categories: &[Category]) -> Option<Self> {
        let ProfileKind::Influencer(details) = &profile.kind else {
            return None;
        };

        let category_names = details
            .category_ids
            .iter()
            .filter_map(|id| categories.iter().find(|c| c.id == *id))
            .take(CARD_CATEGORY_LIMIT)
            .map(|c| c.name.to_string())
            .collect();

        Some(Self {
            id: profile.id.get(),
            full_name: profile.full_name.to_string(),
            initial: profile
                .full_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
            avatar_url: profile.avatar_url.as_ref().map(ToString::to_string),
            bio: profile.bio.clone(),
            niche: details.niche.clone(),
            location: profile.location.clone(),
            followers: format_follower_count(details.followers_count),
            engagement_rate: details
                .engagement_rate
                .map(|rate| format!("{:.1}%", rate.get())),
            categories: category_names,
            instagram_url: details.instagram_url.as_ref().map(ToString::to_string),
            youtube_url: details.youtube_url.as_ref().map(ToString::to_string),
            tiktok_url: details.tiktok_url.as_ref().map(ToString::to_string),
        })
    }
}

/// Values pre-filled into the profile edit forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileFormDto {
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub website: String,
    pub location: String,
    pub avatar_url: String,
    pub niche: String,
    pub instagram_url: String,
    pub youtube_url: String,
    pub tiktok_url: String,
    pub followers_count: String,
    pub engagement_rate: String,
    pub category_ids: Vec<i32>,
    pub company_name: String,
    pub description: String,
    pub trustpilot_url: String,
    pub industry: String,
    pub company_size: String,
}

fn text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl From<&Profile> for ProfileFormDto {
    fn from(profile: &Profile) -> Self {
        let common = Self {
            full_name: profile.full_name.to_string(),
            email: profile.email.to_string(),
            bio: text(profile.bio.as_ref()),
            website: text(profile.website.as_ref()),
            location: text(profile.location.as_ref()),
            avatar_url: text(profile.avatar_url.as_ref()),
            ..Default::default()
        };

        match &profile.kind {
            ProfileKind::Influencer(details) => Self {
                niche: text(details.niche.as_ref()),
                instagram_url: text(details.instagram_url.as_ref()),
                youtube_url: text(details.youtube_url.as_ref()),
                tiktok_url: text(details.tiktok_url.as_ref()),
                followers_count: text(details.followers_count.map(|f| f.get())),
                engagement_rate: text(details.engagement_rate.map(|r| r.get())),
                category_ids: details.category_ids.iter().map(|id| id.get()).collect(),
                ..common
            },
            ProfileKind::Company(details) => Self {
                company_name: details.company_name.to_string(),
                description: text(details.description.as_ref()),
                trustpilot_url: text(details.trustpilot_url.as_ref()),
                industry: text(details.industry.as_ref()),
                company_size: text(details.company_size.as_ref()),
                ..common
            },
        }
    }
}

fn submitted(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl ProfileFormDto {
    /// Replaces the editable influencer fields with what was submitted, so a
    /// rejected form keeps the user's input. Unparseable category boxes are
    /// dropped.
    pub fn fill_influencer(&mut self, form: &InfluencerProfileForm) {
        let mut category_ids: Vec<i32> = form
            .extra
            .keys()
            .filter_map(|key| key.strip_prefix(CATEGORY_FIELD_PREFIX)?.parse().ok())
            .collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        self.full_name = form.full_name.clone();
        self.niche = submitted(&form.niche);
        self.bio = submitted(&form.bio);
        self.website = submitted(&form.website);
        self.location = submitted(&form.location);
        self.avatar_url = submitted(&form.avatar_url);
        self.instagram_url = submitted(&form.instagram_url);
        self.youtube_url = submitted(&form.youtube_url);
        self.tiktok_url = submitted(&form.tiktok_url);
        self.followers_count = submitted(&form.followers_count);
        self.engagement_rate = submitted(&form.engagement_rate);
        self.category_ids = category_ids;
    }

    pub fn fill_company(&mut self, form: &CompanyProfileForm) {
        self.company_name = form.company_name.clone();
        self.description = submitted(&form.description);
        self.website = submitted(&form.website);
        self.trustpilot_url = submitted(&form.trustpilot_url);
        self.industry = submitted(&form.industry);
        self.company_size = submitted(&form.company_size);
        self.location = submitted(&form.location);
    }
}
