use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ApplicationId, ApplicationStatus, CampaignId, Pitch, ProfileId};

/// An influencer's bid to participate in a campaign.
///
/// The record belongs to neither side: the influencer creates it, the owner
/// of the campaign decides on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: ApplicationId,
    pub campaign_id: CampaignId,
    pub influencer_id: ProfileId,
    pub pitch: Pitch,
    pub status: ApplicationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Application joined with the campaign title and applicant name for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationListing {
    pub application: Application,
    pub campaign_title: Option<String>,
    pub influencer_name: Option<String>,
}

/// Data required to insert a new [`Application`]. Always starts `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewApplication {
    pub campaign_id: CampaignId,
    pub influencer_id: ProfileId,
    pub pitch: Pitch,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
