use std::time::Duration;

use anyhow::Context;
use scraper::Html;
use thirtyfour::prelude::*;

use crate::configuration::{LinkedinSettings, WebdriverSettings};
use crate::domain::prospect::{ProspectUrl, SearchQuery};
use crate::services::droid::{login, save_debug_screenshot, scoped, Droid, POLL_INTERVAL};
use crate::services::locator::{default_strategies, discover_profiles};

const PEOPLE_SEARCH_URL: &str = "https://www.linkedin.com/search/results/people/?keywords=";
const RESULTS_CONTAINER: &str = "search-results-container";
const SEARCH_WAIT: Duration = Duration::from_secs(30);
const RENDER_SETTLE_DELAY: Duration = Duration::from_secs(3);
const SEARCH_SCREENSHOT: &str = "debug_search_screenshot.png";

pub enum SearchOutcome {
    Found(Vec<ProspectUrl>),
    NotFound,
    Failed(String),
}

/// Runs a people search in its own browser session and collects profile
/// urls. The session is closed on every exit path.
pub async fn search_for_prospects(
    webdriver: &WebdriverSettings,
    credentials: &LinkedinSettings,
    query: &SearchQuery,
) -> SearchOutcome {
    log::info!(
        "Prospect search started for '{}' in '{}'",
        query.job_title,
        query.location
    );

    let droid = match Droid::launch(webdriver).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Failed to start a browser session for search: {:?}", e);
            return SearchOutcome::Failed(e.to_string());
        }
    };

    scoped(droid, |driver| async move {
        match collect_search_results(&driver, credentials, query).await {
            Ok(profiles) => match profiles.is_empty() {
                true => {
                    log::info!("Search yielded no profile urls for '{}'", query.keywords());
                    SearchOutcome::NotFound
                }
                false => {
                    log::info!("Found {} prospect urls", profiles.len());
                    SearchOutcome::Found(profiles)
                }
            },
            Err(e) => {
                log::error!("An error occurred during prospect search: {:?}", e);
                save_debug_screenshot(&driver, SEARCH_SCREENSHOT).await;
                SearchOutcome::Failed(e.to_string())
            }
        }
    })
    .await
}

async fn collect_search_results(
    driver: &WebDriver,
    credentials: &LinkedinSettings,
    query: &SearchQuery,
) -> anyhow::Result<Vec<ProspectUrl>> {
    login(driver, credentials, SEARCH_WAIT).await?;

    let search_url = format!(
        "{}{}",
        PEOPLE_SEARCH_URL,
        query.keywords().replace(' ', "%20")
    );
    log::info!("Navigating to search url: {}", search_url);
    driver.goto(&search_url).await?;

    driver
        .query(By::ClassName(RESULTS_CONTAINER))
        .wait(SEARCH_WAIT, POLL_INTERVAL)
        .first()
        .await
        .context("search results container never appeared")?;

    // The container lands before the result cards finish rendering.
    tokio::time::sleep(RENDER_SETTLE_DELAY).await;

    let page_source = driver.source().await?;
    let document = Html::parse_document(&page_source);

    Ok(discover_profiles(
        &document,
        &default_strategies(),
        query.max_results,
    ))
}
