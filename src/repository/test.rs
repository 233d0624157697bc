use std::cell::RefCell;

use chrono::Utc;

use crate::domain::application::{Application, ApplicationListing, NewApplication};
use crate::domain::auth::{NewUser, User};
use crate::domain::campaign::{Campaign, CampaignListing, NewCampaign};
use crate::domain::category::Category;
use crate::domain::profile::{
    CompanyDetails, InfluencerDetails, NewProfile, NewProfileKind, Profile, ProfileKind,
    ProfileUpdate,
};
use crate::domain::types::{
    ApplicationId, ApplicationStatus, CampaignId, CampaignStatus, CategoryId, Email, ProfileId,
};
use crate::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, CampaignListQuery,
    CampaignReader, CampaignWriter, CategoryReader, ProfileListQuery, ProfileReader,
    ProfileWriter, RepositoryError, RepositoryResult, UserReader, UserWriter,
};

/// Simple in-memory repository used for unit tests.
///
/// Mirrors the constraints the database enforces: unique emails and one
/// application per influencer and campaign.
#[derive(Default)]
pub struct TestRepository {
    users: RefCell<Vec<User>>,
    profiles: RefCell<Vec<Profile>>,
    categories: Vec<Category>,
    campaigns: RefCell<Vec<Campaign>>,
    applications: RefCell<Vec<Application>>,
}

impl TestRepository {
    pub fn new(profiles: Vec<Profile>, categories: Vec<Category>) -> Self {
        Self {
            profiles: RefCell::new(profiles),
            categories,
            ..Default::default()
        }
    }

    pub fn with_campaigns(self, campaigns: Vec<Campaign>) -> Self {
        *self.campaigns.borrow_mut() = campaigns;
        self
    }

    pub fn with_applications(self, applications: Vec<Application>) -> Self {
        *self.applications.borrow_mut() = applications;
        self
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.borrow().clone()
    }

    pub fn applications(&self) -> Vec<Application> {
        self.applications.borrow().clone()
    }

    pub fn profile(&self, id: ProfileId) -> Option<Profile> {
        self.profiles.borrow().iter().find(|p| p.id == id).cloned()
    }

    fn listing(&self, campaign: Campaign) -> CampaignListing {
        let company_name = self
            .profile(campaign.company_id)
            .map(|p| p.display_name().to_string());
        let category = campaign
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id).cloned());
        CampaignListing {
            campaign,
            company_name,
            category,
        }
    }
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

impl UserReader for TestRepository {
    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }
}

impl UserWriter for TestRepository {
    fn create_user_with_profile(
        &self,
        user: &NewUser,
        profile: &NewProfile,
    ) -> RepositoryResult<ProfileId> {
        let mut users = self.users.borrow_mut();
        let mut profiles = self.profiles.borrow_mut();

        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::ConstraintError(
                "UniqueViolation: users.email".to_string(),
            ));
        }

        let id = ProfileId::new(next_id(users.len().max(profiles.len())))?;
        users.push(User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: user.created_at,
        });

        let kind = match &profile.kind {
            NewProfileKind::Influencer => ProfileKind::Influencer(InfluencerDetails::default()),
            NewProfileKind::Company { company_name } => ProfileKind::Company(CompanyDetails {
                company_name: company_name.clone(),
                industry: None,
                company_size: None,
                description: None,
                trustpilot_url: None,
            }),
        };
        profiles.push(Profile {
            id,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            avatar_url: None,
            bio: None,
            website: None,
            location: None,
            created_at: user.created_at,
            updated_at: user.created_at,
            kind,
        });

        Ok(id)
    }
}

impl ProfileReader for TestRepository {
    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>> {
        Ok(self.profile(id))
    }

    fn list_profiles(&self, query: ProfileListQuery) -> RepositoryResult<Vec<Profile>> {
        let mut items: Vec<Profile> = self
            .profiles
            .borrow()
            .iter()
            .filter(|p| query.role.is_none_or(|role| p.role() == role))
            .filter(|p| {
                !query.with_followers
                    || p.as_influencer()
                        .is_some_and(|d| d.followers_count.is_some())
            })
            .cloned()
            .collect();

        let followers =
            |p: &Profile| p.as_influencer().and_then(|d| d.followers_count.map(|f| f.get()));
        items.sort_by(|a, b| {
            followers(b)
                .is_some()
                .cmp(&followers(a).is_some())
                .then(followers(b).cmp(&followers(a)))
                .then(a.id.cmp(&b.id))
        });

        if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        Ok(items)
    }
}

impl ProfileWriter for TestRepository {
    fn update_profile(&self, id: ProfileId, update: &ProfileUpdate) -> RepositoryResult<usize> {
        let mut profiles = self.profiles.borrow_mut();
        let Some(profile) = profiles
            .iter_mut()
            .find(|p| p.id == id && p.role() == update.role())
        else {
            return Ok(0);
        };

        profile.updated_at = Utc::now().naive_utc();
        match (update, &mut profile.kind) {
            (ProfileUpdate::Influencer(fields), ProfileKind::Influencer(details)) => {
                profile.full_name = fields.full_name.clone();
                profile.bio = fields.bio.clone();
                profile.website = fields.website.clone();
                profile.location = fields.location.clone();
                profile.avatar_url = fields.avatar_url.clone();
                details.niche = fields.niche.clone();
                details.instagram_url = fields.instagram_url.clone();
                details.youtube_url = fields.youtube_url.clone();
                details.tiktok_url = fields.tiktok_url.clone();
                details.followers_count = fields.followers_count;
                details.engagement_rate = fields.engagement_rate;
                details.category_ids = fields.category_ids.clone();
            }
            (ProfileUpdate::Company(fields), ProfileKind::Company(details)) => {
                profile.website = fields.website.clone();
                profile.location = fields.location.clone();
                details.company_name = fields.company_name.clone();
                details.description = fields.description.clone();
                details.trustpilot_url = fields.trustpilot_url.clone();
                details.industry = fields.industry.clone();
                details.company_size = fields.company_size.clone();
            }
            _ => return Ok(0),
        }
        Ok(1)
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut items = self.categories.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }
}

impl CampaignReader for TestRepository {
    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<CampaignListing>> {
        let search = query.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<Campaign> = self
            .campaigns
            .borrow()
            .iter()
            .filter(|c| query.status.is_none_or(|s| c.status == s))
            .filter(|c| query.company_id.is_none_or(|id| c.company_id == id))
            .filter(|c| query.category_id.is_none_or(|id| c.category_id == Some(id)))
            .filter(|c| {
                search.as_deref().is_none_or(|term| {
                    c.title.to_lowercase().contains(term)
                        || c.description.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items.into_iter().map(|c| self.listing(c)).collect())
    }

    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<CampaignListing>> {
        let campaign = self.campaigns.borrow().iter().find(|c| c.id == id).cloned();
        Ok(campaign.map(|c| self.listing(c)))
    }
}

impl CampaignWriter for TestRepository {
    fn create_campaign(&self, campaign: &NewCampaign) -> RepositoryResult<CampaignId> {
        let mut campaigns = self.campaigns.borrow_mut();
        let id = CampaignId::new(next_id(campaigns.len()))?;
        campaigns.push(Campaign {
            id,
            company_id: campaign.company_id,
            category_id: campaign.category_id,
            title: campaign.title.clone(),
            description: campaign.description.clone(),
            requirements: campaign.requirements.clone(),
            budget: campaign.budget,
            status: CampaignStatus::Active,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        });
        Ok(id)
    }

    fn update_campaign_status(
        &self,
        id: CampaignId,
        from: CampaignStatus,
        to: CampaignStatus,
    ) -> RepositoryResult<usize> {
        let mut campaigns = self.campaigns.borrow_mut();
        match campaigns.iter_mut().find(|c| c.id == id && c.status == from) {
            Some(campaign) => {
                campaign.status = to;
                campaign.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl ApplicationReader for TestRepository {
    fn list_applications(
        &self,
        query: ApplicationListQuery,
    ) -> RepositoryResult<Vec<ApplicationListing>> {
        let campaigns = self.campaigns.borrow();
        let mut items: Vec<Application> = self
            .applications
            .borrow()
            .iter()
            .filter(|a| query.campaign_id.is_none_or(|id| a.campaign_id == id))
            .filter(|a| query.influencer_id.is_none_or(|id| a.influencer_id == id))
            .filter(|a| {
                query.company_id.is_none_or(|company| {
                    campaigns
                        .iter()
                        .any(|c| c.id == a.campaign_id && c.company_id == company)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(items
            .into_iter()
            .map(|application| ApplicationListing {
                campaign_title: campaigns
                    .iter()
                    .find(|c| c.id == application.campaign_id)
                    .map(|c| c.title.to_string()),
                influencer_name: self
                    .profile(application.influencer_id)
                    .map(|p| p.full_name.to_string()),
                application,
            })
            .collect())
    }

    fn get_application_by_id(&self, id: ApplicationId) -> RepositoryResult<Option<Application>> {
        Ok(self
            .applications
            .borrow()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }
}

impl ApplicationWriter for TestRepository {
    fn create_application(&self, application: &NewApplication) -> RepositoryResult<ApplicationId> {
        let mut applications = self.applications.borrow_mut();
        if applications.iter().any(|a| {
            a.influencer_id == application.influencer_id
                && a.campaign_id == application.campaign_id
        }) {
            return Err(RepositoryError::ConstraintError(
                "UniqueViolation: applications.influencer_id, applications.campaign_id"
                    .to_string(),
            ));
        }

        let id = ApplicationId::new(next_id(applications.len()))?;
        applications.push(Application {
            id,
            campaign_id: application.campaign_id,
            influencer_id: application.influencer_id,
            pitch: application.pitch.clone(),
            status: ApplicationStatus::Pending,
            created_at: application.created_at,
            updated_at: application.updated_at,
        });
        Ok(id)
    }

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepositoryResult<usize> {
        let mut applications = self.applications.borrow_mut();
        match applications
            .iter_mut()
            .find(|a| a.id == id && a.status == ApplicationStatus::Pending)
        {
            Some(application) => {
                application.status = status;
                application.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Fixture builders shared by service tests.
pub mod fixtures {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::campaign::BudgetRange;
    use crate::domain::types::{
        BudgetAmount, CampaignDescription, CampaignRequirements, CampaignTitle, CategoryName,
        CompanyName, FollowerCount, FullName, Pitch,
    };

    pub fn timestamp(secs: i64) -> NaiveDateTime {
        chrono::DateTime::from_timestamp(secs, 0)
            .unwrap()
            .naive_utc()
    }

    pub fn influencer(id: i32, name: &str, bio: Option<&str>, followers: Option<i32>) -> Profile {
        Profile {
            id: ProfileId::new(id).unwrap(),
            email: Email::new(format!("influencer{id}@example.com")).unwrap(),
            full_name: FullName::new(name).unwrap(),
            avatar_url: None,
            bio: bio.map(str::to_string),
            website: None,
            location: None,
            created_at: timestamp(0),
            updated_at: timestamp(0),
            kind: ProfileKind::Influencer(InfluencerDetails {
                followers_count: followers.map(|f| FollowerCount::new(f).unwrap()),
                ..Default::default()
            }),
        }
    }

    pub fn company(id: i32, name: &str) -> Profile {
        Profile {
            id: ProfileId::new(id).unwrap(),
            email: Email::new(format!("company{id}@example.com")).unwrap(),
            full_name: FullName::new(name).unwrap(),
            avatar_url: None,
            bio: None,
            website: None,
            location: None,
            created_at: timestamp(0),
            updated_at: timestamp(0),
            kind: ProfileKind::Company(CompanyDetails {
                company_name: CompanyName::new(name).unwrap(),
                industry: None,
                company_size: None,
                description: None,
                trustpilot_url: None,
            }),
        }
    }

    pub fn category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            description: None,
        }
    }

    pub fn campaign(id: i32, company_id: i32, status: CampaignStatus) -> Campaign {
        Campaign {
            id: CampaignId::new(id).unwrap(),
            company_id: ProfileId::new(company_id).unwrap(),
            category_id: None,
            title: CampaignTitle::new(format!("Campaign {id}")).unwrap(),
            description: CampaignDescription::new("Show our summer drinks").unwrap(),
            requirements: CampaignRequirements::new("10k followers").unwrap(),
            budget: BudgetRange::new(BudgetAmount::new(100).unwrap(), BudgetAmount::new(500).unwrap())
                .unwrap(),
            status,
            created_at: timestamp(id as i64),
            updated_at: timestamp(id as i64),
        }
    }

    pub fn application(
        id: i32,
        campaign_id: i32,
        influencer_id: i32,
        status: ApplicationStatus,
    ) -> Application {
        Application {
            id: ApplicationId::new(id).unwrap(),
            campaign_id: CampaignId::new(campaign_id).unwrap(),
            influencer_id: ProfileId::new(influencer_id).unwrap(),
            pitch: Pitch::new("I make great videos").unwrap(),
            status,
            created_at: timestamp(id as i64),
            updated_at: timestamp(id as i64),
        }
    }
}
