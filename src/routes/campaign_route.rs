use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::campaign::CampaignContext;
use crate::domain::prospect::SearchQuery;
use crate::services::{run_campaign, CampaignError, LinkedinScraper, OpenaiClient};

// Each profile costs a full login plus a model call.
const MAX_PROSPECTS_PER_CAMPAIGN: usize = 3;

#[derive(Deserialize)]
pub struct CampaignRequest {
    pub ideal_job_roles: String,
    pub region_location: String,
    pub product_description: String,
    pub target_industry: String,
    pub outreach_goal: String,
    pub brand_voice: String,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

#[post("/start-campaign")]
async fn start_campaign(
    scraper: web::Data<LinkedinScraper>,
    openai_client: web::Data<OpenaiClient>,
    body: web::Json<CampaignRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    log::info!(
        "Campaign started: searching for '{}' in '{}'",
        request.ideal_job_roles,
        request.region_location
    );

    let query = SearchQuery {
        job_title: request.ideal_job_roles.clone(),
        location: request.region_location.clone(),
        max_results: MAX_PROSPECTS_PER_CAMPAIGN,
    };
    let campaign = CampaignContext {
        product_description: request.product_description,
        target_industry: request.target_industry,
        ideal_job_roles: request.ideal_job_roles,
        outreach_goal: request.outreach_goal,
        brand_voice: request.brand_voice,
    };

    match run_campaign(
        scraper.get_ref(),
        openai_client.get_ref(),
        &query,
        &campaign,
    )
    .await
    {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(CampaignError::NoProspects) => HttpResponse::NotFound().json(ErrorBody {
            detail: "Could not find any prospects matching the criteria.".to_string(),
        }),
        Err(CampaignError::SearchFailed(reason)) => {
            HttpResponse::BadGateway().json(ErrorBody { detail: reason })
        }
    }
}
