use serde::Serialize;

use crate::domain::application::ApplicationListing;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDto {
    pub id: i32,
    pub campaign_id: i32,
    pub campaign_title: String,
    pub influencer_id: i32,
    pub influencer_name: String,
    pub pitch: String,
    pub status: &'static str,
    pub is_pending: bool,
    pub created_at: String,
}

impl From<ApplicationListing> for ApplicationDto {
    fn from(value: ApplicationListing) -> Self {
        let application = value.application;
        Self {
            id: application.id.get(),
            campaign_id: application.campaign_id.get(),
            campaign_title: value.campaign_title.unwrap_or_default(),
            influencer_id: application.influencer_id.get(),
            influencer_name: value.influencer_name.unwrap_or_default(),
            pitch: application.pitch.into_inner(),
            status: application.status.as_str(),
            is_pending: !application.status.is_terminal(),
            created_at: application.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
