use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::application::NewApplication;
use crate::domain::types::{
    ApplicationDecision, CampaignId, Pitch, ProfileId, TypeConstraintError,
};
use crate::forms::invalid_fields;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct ApplyForm {
    #[validate(length(min = 1, max = 5000))]
    pub pitch: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyFormPayload {
    pub pitch: Pitch,
}

impl ApplyFormPayload {
    pub fn into_new_application(
        self,
        campaign_id: CampaignId,
        influencer_id: ProfileId,
    ) -> NewApplication {
        let now = Utc::now().naive_utc();
        NewApplication {
            campaign_id,
            influencer_id,
            pitch: self.pitch,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApplyFormError {
    #[error("Application form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Application form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for ApplyFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<ApplyForm> for ApplyFormPayload {
    type Error = ApplyFormError;

    fn try_from(value: ApplyForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            pitch: Pitch::new(value.pitch)?,
        })
    }
}

/// Accept or reject a pending application. `status` carries the target
/// status word (`accepted`/`rejected`).
#[derive(Deserialize, Validate)]
pub struct ApplicationStatusForm {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicationStatusFormPayload {
    pub decision: ApplicationDecision,
}

#[derive(Debug, Error)]
pub enum ApplicationStatusFormError {
    #[error("Application status form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Application status form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for ApplicationStatusFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<ApplicationStatusForm> for ApplicationStatusFormPayload {
    type Error = ApplicationStatusFormError;

    fn try_from(value: ApplicationStatusForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            decision: ApplicationDecision::try_from(value.status.as_str())?,
        })
    }
}
