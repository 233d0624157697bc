//! Who may do what to which record.
//!
//! Every mutating flow in the service layer passes through one of the
//! `ensure_*` checks below before touching the repository, so a rejected
//! action never produces a partial write. The checks are pure: callers load
//! the actor profile and the target records first.

use thiserror::Error;

use crate::domain::application::Application;
use crate::domain::campaign::Campaign;
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::domain::types::{ApplicationStatus, CampaignStatus, Role};

/// Reasons an action is refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("only influencers can {0}")]
    InfluencerOnly(&'static str),
    #[error("only companies can {0}")]
    CompanyOnly(&'static str),
    #[error("the campaign belongs to another company")]
    NotCampaignOwner,
    #[error("the profile belongs to another user")]
    NotProfileOwner,
    #[error("a {0} profile cannot be edited with {1} fields")]
    RoleMismatch(Role, Role),
    #[error("the campaign is not accepting applications")]
    CampaignNotActive,
    #[error("an application for this campaign already exists")]
    AlreadyApplied,
    #[error("the application does not belong to this campaign")]
    ForeignApplication,
    #[error("the application is already {0}")]
    AlreadyDecided(ApplicationStatus),
    #[error("a campaign cannot move from {0} to {1}")]
    InvalidCampaignTransition(CampaignStatus, CampaignStatus),
}

impl AccessError {
    /// Whether the refusal stems from the current state of the target rather
    /// than from who the actor is.
    pub const fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            Self::CampaignNotActive
                | Self::AlreadyApplied
                | Self::AlreadyDecided(_)
                | Self::InvalidCampaignTransition(_, _)
        )
    }
}

pub fn ensure_influencer(actor: &Profile, action: &'static str) -> Result<(), AccessError> {
    match actor.role() {
        Role::Influencer => Ok(()),
        Role::Company => Err(AccessError::InfluencerOnly(action)),
    }
}

pub fn ensure_company(actor: &Profile, action: &'static str) -> Result<(), AccessError> {
    match actor.role() {
        Role::Company => Ok(()),
        Role::Influencer => Err(AccessError::CompanyOnly(action)),
    }
}

/// Influencer submits an application to an active campaign.
///
/// `already_applied` is whatever the caller could observe; the storage
/// layer still enforces one application per influencer and campaign.
pub fn ensure_can_apply(
    actor: &Profile,
    campaign: &Campaign,
    already_applied: bool,
) -> Result<(), AccessError> {
    ensure_influencer(actor, "apply to campaigns")?;
    if !campaign.status.accepts_applications() {
        return Err(AccessError::CampaignNotActive);
    }
    if already_applied {
        return Err(AccessError::AlreadyApplied);
    }
    Ok(())
}

/// Company lists the applications of one of its own campaigns.
pub fn ensure_can_view_applications(
    actor: &Profile,
    campaign: &Campaign,
) -> Result<(), AccessError> {
    ensure_company(actor, "review applications")?;
    if !campaign.is_owned_by(actor.id) {
        return Err(AccessError::NotCampaignOwner);
    }
    Ok(())
}

/// Campaign owner accepts or rejects a pending application.
pub fn ensure_can_decide_application(
    actor: &Profile,
    campaign: &Campaign,
    application: &Application,
) -> Result<(), AccessError> {
    ensure_can_view_applications(actor, campaign)?;
    if application.campaign_id != campaign.id {
        return Err(AccessError::ForeignApplication);
    }
    if application.status.is_terminal() {
        return Err(AccessError::AlreadyDecided(application.status));
    }
    Ok(())
}

pub fn ensure_can_create_campaign(actor: &Profile) -> Result<(), AccessError> {
    ensure_company(actor, "create campaigns")
}

/// Campaign owner pauses, resumes or completes a campaign.
pub fn ensure_can_set_campaign_status(
    actor: &Profile,
    campaign: &Campaign,
    next: CampaignStatus,
) -> Result<(), AccessError> {
    ensure_company(actor, "manage campaigns")?;
    if !campaign.is_owned_by(actor.id) {
        return Err(AccessError::NotCampaignOwner);
    }
    if !campaign.status.can_transition_to(next) {
        return Err(AccessError::InvalidCampaignTransition(campaign.status, next));
    }
    Ok(())
}

/// Owner edits their own profile with fields matching its role.
pub fn ensure_can_edit_profile(
    actor: &Profile,
    target: &Profile,
    update: &ProfileUpdate,
) -> Result<(), AccessError> {
    if actor.id != target.id {
        return Err(AccessError::NotProfileOwner);
    }
    if update.role() != target.role() {
        return Err(AccessError::RoleMismatch(target.role(), update.role()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::campaign::BudgetRange;
    use crate::domain::profile::{
        CompanyDetails, CompanyProfileUpdate, InfluencerDetails, ProfileKind,
    };
    use crate::domain::types::{
        ApplicationId, BudgetAmount, CampaignDescription, CampaignId, CampaignRequirements,
        CampaignTitle, CompanyName, Email, FullName, Pitch, ProfileId,
    };

    fn influencer(id: i32) -> Profile {
        Profile {
            id: ProfileId::new(id).unwrap(),
            email: Email::new(format!("influencer{id}@example.com")).unwrap(),
            full_name: FullName::new("David Kim").unwrap(),
            avatar_url: None,
            bio: None,
            website: None,
            location: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
            kind: ProfileKind::Influencer(InfluencerDetails::default()),
        }
    }

    fn company(id: i32) -> Profile {
        Profile {
            kind: ProfileKind::Company(CompanyDetails {
                company_name: CompanyName::new("Acme").unwrap(),
                industry: None,
                company_size: None,
                description: None,
                trustpilot_url: None,
            }),
            email: Email::new(format!("company{id}@example.com")).unwrap(),
            ..influencer(id)
        }
    }

    fn campaign(owner: i32, status: CampaignStatus) -> Campaign {
        Campaign {
            id: CampaignId::new(10).unwrap(),
            company_id: ProfileId::new(owner).unwrap(),
            category_id: None,
            title: CampaignTitle::new("Summer launch").unwrap(),
            description: CampaignDescription::new("Show our drinks").unwrap(),
            requirements: CampaignRequirements::new("10k followers").unwrap(),
            budget: BudgetRange::new(BudgetAmount::new(100).unwrap(), BudgetAmount::new(500).unwrap())
                .unwrap(),
            status,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn application(status: ApplicationStatus) -> Application {
        Application {
            id: ApplicationId::new(7).unwrap(),
            campaign_id: CampaignId::new(10).unwrap(),
            influencer_id: ProfileId::new(1).unwrap(),
            pitch: Pitch::new("I cook with your drinks").unwrap(),
            status,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn influencer_cannot_create_campaign() {
        assert_eq!(
            ensure_can_create_campaign(&influencer(1)),
            Err(AccessError::CompanyOnly("create campaigns"))
        );
        assert!(ensure_can_create_campaign(&company(2)).is_ok());
    }

    #[test]
    fn only_influencers_apply_to_active_campaigns() {
        let active = campaign(2, CampaignStatus::Active);
        assert!(ensure_can_apply(&influencer(1), &active, false).is_ok());
        assert_eq!(
            ensure_can_apply(&company(3), &active, false),
            Err(AccessError::InfluencerOnly("apply to campaigns"))
        );
        assert_eq!(
            ensure_can_apply(&influencer(1), &campaign(2, CampaignStatus::Paused), false),
            Err(AccessError::CampaignNotActive)
        );
        assert_eq!(
            ensure_can_apply(&influencer(1), &active, true),
            Err(AccessError::AlreadyApplied)
        );
    }

    #[test]
    fn only_owner_decides_pending_applications() {
        let owned = campaign(2, CampaignStatus::Active);
        let pending = application(ApplicationStatus::Pending);

        assert!(ensure_can_decide_application(&company(2), &owned, &pending).is_ok());
        assert_eq!(
            ensure_can_decide_application(&company(3), &owned, &pending),
            Err(AccessError::NotCampaignOwner)
        );
        assert_eq!(
            ensure_can_decide_application(&influencer(1), &owned, &pending),
            Err(AccessError::CompanyOnly("review applications"))
        );
    }

    #[test]
    fn decided_applications_are_terminal() {
        let owned = campaign(2, CampaignStatus::Active);
        for status in [ApplicationStatus::Accepted, ApplicationStatus::Rejected] {
            let err = ensure_can_decide_application(&company(2), &owned, &application(status))
                .unwrap_err();
            assert_eq!(err, AccessError::AlreadyDecided(status));
            assert!(err.is_state_conflict());
        }
    }

    #[test]
    fn application_must_belong_to_campaign() {
        let mut other = campaign(2, CampaignStatus::Active);
        other.id = CampaignId::new(11).unwrap();
        assert_eq!(
            ensure_can_decide_application(
                &company(2),
                &other,
                &application(ApplicationStatus::Pending)
            ),
            Err(AccessError::ForeignApplication)
        );
    }

    #[test]
    fn campaign_status_changes_follow_state_machine() {
        let owner = company(2);
        assert!(
            ensure_can_set_campaign_status(
                &owner,
                &campaign(2, CampaignStatus::Active),
                CampaignStatus::Paused
            )
            .is_ok()
        );
        assert_eq!(
            ensure_can_set_campaign_status(
                &owner,
                &campaign(2, CampaignStatus::Completed),
                CampaignStatus::Active
            ),
            Err(AccessError::InvalidCampaignTransition(
                CampaignStatus::Completed,
                CampaignStatus::Active
            ))
        );
        assert_eq!(
            ensure_can_set_campaign_status(
                &company(3),
                &campaign(2, CampaignStatus::Active),
                CampaignStatus::Paused
            ),
            Err(AccessError::NotCampaignOwner)
        );
    }

    #[test]
    fn profile_edits_are_owner_and_role_scoped() {
        let owner = company(2);
        let update = ProfileUpdate::Company(CompanyProfileUpdate {
            company_name: CompanyName::new("Acme Nordic").unwrap(),
            description: None,
            website: None,
            trustpilot_url: None,
            industry: None,
            company_size: None,
            location: None,
        });

        assert!(ensure_can_edit_profile(&owner, &owner, &update).is_ok());
        assert_eq!(
            ensure_can_edit_profile(&company(3), &owner, &update),
            Err(AccessError::NotProfileOwner)
        );
        let target = influencer(1);
        assert_eq!(
            ensure_can_edit_profile(&target, &target, &update),
            Err(AccessError::RoleMismatch(Role::Influencer, Role::Company))
        );
    }
}
