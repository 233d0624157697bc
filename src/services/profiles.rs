use serde::Serialize;

use crate::domain::access::ensure_can_edit_profile;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::profile::ProfileUpdate;
use crate::domain::types::Role;
use crate::dto::categories::CategoryDto;
use crate::dto::profiles::ProfileFormDto;
use crate::repository::{CategoryReader, ProfileReader, ProfileWriter};

use super::{ServiceError, ServiceResult, load_actor, or_empty};

#[derive(Debug, Serialize)]
pub struct ProfileEditPage {
    pub profile: ProfileFormDto,
    pub categories: Vec<CategoryDto>,
}

/// Current values for the edit form of the actor's own profile. `role` is
/// the form being opened and must match the stored role.
pub fn load_profile_for_edit<R>(
    user: &AuthenticatedUser,
    role: Role,
    repo: &R,
) -> ServiceResult<ProfileEditPage>
where
    R: ProfileReader + CategoryReader,
{
    let actor = load_actor(user, repo)?;
    if actor.role() != role {
        return Err(ServiceError::Forbidden(format!(
            "a {} profile cannot be edited as {role}",
            actor.role()
        )));
    }

    let categories = match role {
        Role::Influencer => or_empty(repo.list_categories(), "categories")
            .into_iter()
            .map(CategoryDto::from)
            .collect(),
        Role::Company => Vec::new(),
    };

    Ok(ProfileEditPage {
        profile: ProfileFormDto::from(&actor),
        categories,
    })
}

/// Writes the fields of the actor's own role.
pub fn update_profile<R>(
    user: &AuthenticatedUser,
    update: ProfileUpdate,
    repo: &R,
) -> ServiceResult<()>
where
    R: ProfileReader + ProfileWriter,
{
    let actor = load_actor(user, repo)?;
    ensure_can_edit_profile(&actor, &actor, &update)?;

    match repo.update_profile(actor.id, &update) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update profile {}: {e}", actor.id);
            Err(ServiceError::Internal)
        }
    }
}
