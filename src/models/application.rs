use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::application::{
    Application as DomainApplication, NewApplication as DomainNewApplication,
};
use crate::domain::types::{ApplicationStatus, Pitch, TypeConstraintError};

/// Diesel model representing the `applications` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::applications)]
pub struct Application {
    pub id: i32,
    pub campaign_id: i32,
    pub influencer_id: i32,
    pub pitch: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::applications)]
pub struct NewApplication {
    pub campaign_id: i32,
    pub influencer_id: i32,
    pub pitch: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Application> for DomainApplication {
    type Error = TypeConstraintError;

    fn try_from(application: Application) -> Result<Self, Self::Error> {
        Ok(Self {
            id: application.id.try_into()?,
            campaign_id: application.campaign_id.try_into()?,
            influencer_id: application.influencer_id.try_into()?,
            pitch: Pitch::new(application.pitch)?,
            status: ApplicationStatus::try_from(application.status)?,
            created_at: application.created_at,
            updated_at: application.updated_at,
        })
    }
}

impl From<DomainNewApplication> for NewApplication {
    fn from(application: DomainNewApplication) -> Self {
        Self {
            campaign_id: application.campaign_id.get(),
            influencer_id: application.influencer_id.get(),
            pitch: application.pitch.into_inner(),
            status: ApplicationStatus::Pending.as_str().to_string(),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}
