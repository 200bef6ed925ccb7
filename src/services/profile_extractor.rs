use std::time::Duration;

use anyhow::Context;
use itertools::Itertools;
use scraper::{Html, Selector};
use thirtyfour::error::WebDriverResult;
use thirtyfour::prelude::*;

use crate::configuration::{LinkedinSettings, WebdriverSettings};
use crate::domain::prospect::ProspectUrl;
use crate::services::droid::{login, save_debug_screenshot, scoped, Droid, POLL_INTERVAL};

pub const MISSING_BODY_TEXT: &str = "Could not find body content of the profile.";
const PROFILE_WAIT: Duration = Duration::from_secs(20);
const MAX_SCROLL_ROUNDS: u8 = 3;
const SCROLL_SETTLE_DELAY: Duration = Duration::from_secs(3);
const PROFILE_SCREENSHOT: &str = "debug_screenshot.png";

/// Scrapes the visible text of one profile in its own browser session.
/// Failures come back as descriptive text in place of content; this
/// function never returns an error. The session is closed on every exit
/// path.
pub async fn get_profile_data(
    webdriver: &WebdriverSettings,
    credentials: &LinkedinSettings,
    profile: &ProspectUrl,
) -> String {
    let droid = match Droid::launch(webdriver).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Failed to start a browser session for {}: {:?}", profile, e);
            return format!("Error scraping profile: {}", e);
        }
    };

    scoped(droid, |driver| async move {
        match read_profile(&driver, credentials, profile).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("An error occurred while scraping {}: {:?}", profile, e);
                save_debug_screenshot(&driver, PROFILE_SCREENSHOT).await;
                format!("Error scraping profile: {}", e)
            }
        }
    })
    .await
}

async fn read_profile(
    driver: &WebDriver,
    credentials: &LinkedinSettings,
    profile: &ProspectUrl,
) -> anyhow::Result<String> {
    login(driver, credentials, PROFILE_WAIT).await?;

    log::info!("Navigating to profile: {}", profile);
    driver.goto(profile.as_str()).await?;

    driver
        .query(By::Tag("h1"))
        .wait(PROFILE_WAIT, POLL_INTERVAL)
        .first()
        .await
        .context("profile headline never appeared")?;

    scroll_until_settled(driver).await?;

    let page_source = driver.source().await?;
    Ok(extract_body_text(&page_source))
}

/// Scrolls to the bottom in rounds so lazily loaded sections render,
/// stopping early once the page height stabilizes.
async fn scroll_until_settled(driver: &WebDriver) -> WebDriverResult<()> {
    let mut last_height = page_height(driver).await?;

    for _ in 0..MAX_SCROLL_ROUNDS {
        driver
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        tokio::time::sleep(SCROLL_SETTLE_DELAY).await;

        let new_height = page_height(driver).await?;
        if new_height == last_height {
            break;
        }
        last_height = new_height;
    }

    Ok(())
}

async fn page_height(driver: &WebDriver) -> WebDriverResult<u64> {
    driver
        .execute("return document.body.scrollHeight", vec![])
        .await?
        .convert()
}

/// Flattens the page body into newline separated text, the way the
/// downstream model expects it. The model copes with leftover chrome text.
pub fn extract_body_text(page_source: &str) -> String {
    let document = Html::parse_document(page_source);
    let body_selector = Selector::parse("body").unwrap();

    match document.select(&body_selector).next() {
        Some(body) => {
            let text = body
                .text()
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .join("\n");

            match text.is_empty() {
                true => MISSING_BODY_TEXT.to_string(),
                false => text,
            }
        }
        None => MISSING_BODY_TEXT.to_string(),
    }
}
