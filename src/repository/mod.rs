use crate::db::{DbConnection, DbPool};
use crate::domain::application::{Application, ApplicationListing, NewApplication};
use crate::domain::auth::{NewUser, User};
use crate::domain::campaign::{CampaignListing, NewCampaign};
use crate::domain::category::Category;
use crate::domain::profile::{NewProfile, Profile, ProfileUpdate};
use crate::domain::types::{
    ApplicationId, ApplicationStatus, CampaignId, CampaignStatus, CategoryId, Email, ProfileId,
    Role,
};

pub mod application;
pub mod campaign;
pub mod category;
pub mod errors;
pub mod profile;
#[cfg(test)]
pub mod test;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing campaigns.
#[derive(Debug, Clone, Default)]
pub struct CampaignListQuery {
    pub status: Option<CampaignStatus>,
    /// Restrict to campaigns owned by this company.
    pub company_id: Option<ProfileId>,
    pub category_id: Option<CategoryId>,
    /// Case-insensitive match on title or description.
    pub search: Option<String>,
}

impl CampaignListQuery {
    pub fn status(mut self, status: CampaignStatus) -> Self {
        self.status = Some(status);
        self
    }
    pub fn company(mut self, company_id: ProfileId) -> Self {
        self.company_id = Some(company_id);
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into().trim().to_string();
        self.search = (!search.is_empty()).then_some(search);
        self
    }
}

/// Query parameters used when listing applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationListQuery {
    pub campaign_id: Option<CampaignId>,
    pub influencer_id: Option<ProfileId>,
    /// Restrict to applications for campaigns owned by this company.
    pub company_id: Option<ProfileId>,
}

impl ApplicationListQuery {
    pub fn campaign(mut self, campaign_id: CampaignId) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }
    pub fn influencer(mut self, influencer_id: ProfileId) -> Self {
        self.influencer_id = Some(influencer_id);
        self
    }
    pub fn company(mut self, company_id: ProfileId) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

/// Query parameters used when listing profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileListQuery {
    pub role: Option<Role>,
    /// Skip profiles without a follower count.
    pub with_followers: bool,
    pub limit: Option<usize>,
}

impl ProfileListQuery {
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
    pub fn with_followers(mut self) -> Self {
        self.with_followers = true;
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read access to account credentials.
pub trait UserReader {
    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    /// Create the account and its profile atomically, returning the shared id.
    fn create_user_with_profile(
        &self,
        user: &NewUser,
        profile: &NewProfile,
    ) -> RepositoryResult<ProfileId>;
}

/// Read-only operations for profiles.
pub trait ProfileReader {
    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>>;
    /// Profiles ordered by follower count, largest first.
    fn list_profiles(&self, query: ProfileListQuery) -> RepositoryResult<Vec<Profile>>;
}

pub trait ProfileWriter {
    /// Update the fields of the profile's own role. Returns the number of
    /// profile rows changed; zero when the id or role does not match.
    fn update_profile(&self, id: ProfileId, update: &ProfileUpdate) -> RepositoryResult<usize>;
}

/// Read-only operations for the category lookup table.
pub trait CategoryReader {
    /// All categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Read-only operations for campaigns.
pub trait CampaignReader {
    /// Campaigns matching the query, newest first, with company and category.
    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<CampaignListing>>;
    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<CampaignListing>>;
}

pub trait CampaignWriter {
    /// Persist a new campaign in the `active` state.
    fn create_campaign(&self, campaign: &NewCampaign) -> RepositoryResult<CampaignId>;
    /// Move a campaign from `from` to `to`. Returns zero when the stored
    /// status no longer equals `from`.
    fn update_campaign_status(
        &self,
        id: CampaignId,
        from: CampaignStatus,
        to: CampaignStatus,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for applications.
pub trait ApplicationReader {
    /// Applications matching the query, newest first, with campaign title and applicant name.
    fn list_applications(
        &self,
        query: ApplicationListQuery,
    ) -> RepositoryResult<Vec<ApplicationListing>>;
    fn get_application_by_id(&self, id: ApplicationId) -> RepositoryResult<Option<Application>>;
}

pub trait ApplicationWriter {
    /// Persist a new `pending` application. A second application for the
    /// same influencer and campaign fails with a constraint error.
    fn create_application(&self, application: &NewApplication) -> RepositoryResult<ApplicationId>;
    /// Decide a pending application. Returns zero when it is no longer pending.
    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepositoryResult<usize>;
}
