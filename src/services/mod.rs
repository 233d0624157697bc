//! Business logic behind the pages, generic over the repository traits so
//! routes stay thin and tests can run against the in-memory repository.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::profile::Profile;
use crate::repository::{ProfileReader, RepositoryResult};

pub mod applications;
pub mod auth;
pub mod campaigns;
pub mod dashboard;
pub mod errors;
pub mod influencers;
pub mod profiles;

pub use errors::{ServiceError, ServiceResult, UserMessage};

/// Loads the profile of the signed-in actor.
///
/// A session whose profile no longer exists is treated as signed out.
pub(crate) fn load_actor<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Profile>
where
    R: ProfileReader,
{
    match repo.get_profile_by_id(user.id) {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => {
            log::warn!("Session refers to missing profile {}", user.id);
            Err(ServiceError::Unauthorized)
        }
        Err(e) => {
            log::error!("Failed to load profile {}: {e}", user.id);
            Err(ServiceError::Internal)
        }
    }
}

/// Read failures on list pages render an empty list instead of an error page.
pub(crate) fn or_empty<T>(result: RepositoryResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("Failed to list {what}: {e}");
        Vec::new()
    })
}
