use crate::domain::access::ensure_can_decide_application;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{ApplicationId, ApplicationStatus, CampaignId};
use crate::forms::applications::ApplicationStatusFormPayload;
use crate::repository::{ApplicationReader, ApplicationWriter, CampaignReader, ProfileReader};

use super::{ServiceError, ServiceResult, UserMessage, load_actor};

/// Campaign owner accepts or rejects a pending application.
///
/// Returns the campaign the application belongs to, so the caller can
/// redirect back to it, and the new status.
pub fn decide_application<R>(
    user: &AuthenticatedUser,
    application_id: ApplicationId,
    payload: ApplicationStatusFormPayload,
    repo: &R,
) -> ServiceResult<(CampaignId, ApplicationStatus)>
where
    R: ProfileReader + CampaignReader + ApplicationReader + ApplicationWriter,
{
    let actor = load_actor(user, repo)?;

    let application = match repo.get_application_by_id(application_id) {
        Ok(Some(application)) => application,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load application {application_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let campaign = match repo.get_campaign_by_id(application.campaign_id) {
        Ok(Some(listing)) => listing.campaign,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load campaign {}: {e}", application.campaign_id);
            return Err(ServiceError::Internal);
        }
    };

    ensure_can_decide_application(&actor, &campaign, &application)?;

    let status = payload.decision.resulting_status();
    match repo.update_application_status(application_id, status) {
        // Decided concurrently by another request.
        Ok(0) => Err(ServiceError::Conflict(UserMessage::new(
            "errors.stale_application",
        ))),
        Ok(_) => Ok((campaign.id, status)),
        Err(e) => {
            log::error!("Failed to update application status: {e}");
            Err(ServiceError::Internal)
        }
    }
}
