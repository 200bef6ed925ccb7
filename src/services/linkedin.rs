use async_trait::async_trait;

use crate::configuration::{LinkedinSettings, WebdriverSettings};
use crate::domain::prospect::{ProspectUrl, SearchQuery};
use crate::services::pipeline::ProspectSource;
use crate::services::profile_extractor::get_profile_data;
use crate::services::prospect_search::{search_for_prospects, SearchOutcome};

/// Production prospect source. Each call opens and closes its own browser
/// session; nothing is shared between search and extraction.
pub struct LinkedinScraper {
    webdriver: WebdriverSettings,
    credentials: LinkedinSettings,
}

impl LinkedinScraper {
    pub fn new(webdriver: WebdriverSettings, credentials: LinkedinSettings) -> Self {
        LinkedinScraper {
            webdriver,
            credentials,
        }
    }
}

#[async_trait]
impl ProspectSource for LinkedinScraper {
    async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        search_for_prospects(&self.webdriver, &self.credentials, query).await
    }

    async fn extract(&self, profile: &ProspectUrl) -> String {
        get_profile_data(&self.webdriver, &self.credentials, profile).await
    }
}
