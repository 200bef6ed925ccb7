use serde::{Deserialize, Serialize};

use crate::domain::prospect::ProspectUrl;

/// Campaign parameters, opaque to the scraping pipeline. Only the message
/// generator reads these.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignContext {
    pub product_description: String,
    pub target_industry: String,
    pub ideal_job_roles: String,
    pub outreach_goal: String,
    pub brand_voice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMessage {
    pub thought_process: String,
    pub personalized_message: String,
}

#[derive(Debug, Serialize)]
pub struct CampaignResult {
    #[serde(flatten)]
    pub message: GeneratedMessage,
    pub profile_url: ProspectUrl,
}
