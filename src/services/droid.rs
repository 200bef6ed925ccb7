use std::future::Future;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use fake_user_agent::get_chrome_rua;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thiserror::Error;

use crate::configuration::{LinkedinSettings, WebdriverSettings};

const LOGIN_URL: &str = "https://www.linkedin.com/login";
// Element whose presence confirms the feed rendered behind the login form.
const POST_LOGIN_LANDMARK: &str = "global-nav-search";
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(40);
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start a webdriver session: {0}")]
    Launch(#[source] WebDriverError),
    #[error("post-login landmark did not appear within {0:?}")]
    LoginTimeout(Duration),
    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
}

pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    /// Launches a fresh, isolated browser session. One per operation, never
    /// reused across calls.
    pub async fn launch(settings: &WebdriverSettings) -> Result<Self, SessionError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg(&format!("user-agent={}", get_chrome_rua()))?;

        let driver = WebDriver::new(&settings.url, caps)
            .await
            .map_err(SessionError::Launch)?;
        driver.maximize_window().await?;
        driver.set_page_load_timeout(PAGE_LOAD_TIMEOUT).await?;

        Ok(Droid { driver })
    }
}

#[async_trait]
pub trait Session: Sized + Send {
    type Driver: Clone + Send + Sync;

    fn driver(&self) -> Self::Driver;

    async fn dispose(self);
}

#[async_trait]
impl Session for Droid {
    type Driver = WebDriver;

    fn driver(&self) -> WebDriver {
        self.driver.clone()
    }

    async fn dispose(self) {
        log::info!("Closing browser session");
        if let Err(e) = self.driver.quit().await {
            log::error!("Failed to close browser session: {:?}", e);
        }
    }
}

/// Runs `body` against the session's driver handle, then disposes the
/// session no matter how the body exits.
pub async fn scoped<S, F, Fut, T>(session: S, body: F) -> T
where
    S: Session,
    F: FnOnce(S::Driver) -> Fut + Send,
    Fut: Future<Output = T> + Send,
{
    let driver = session.driver();
    let result = body(driver).await;
    session.dispose().await;
    result
}

/// Submits configured credentials and waits for the post-login landmark.
pub async fn login(
    driver: &WebDriver,
    credentials: &LinkedinSettings,
    wait: Duration,
) -> Result<(), SessionError> {
    log::info!("Navigating to login page");
    driver.goto(LOGIN_URL).await?;

    let username_field = driver
        .query(By::Id("username"))
        .wait(wait, POLL_INTERVAL)
        .first()
        .await?;
    username_field.send_keys(credentials.email.as_str()).await?;

    let password_field = driver.find(By::Id("password")).await?;
    password_field
        .send_keys(credentials.password.as_str())
        .await?;

    driver
        .find(By::XPath("//button[@type='submit']"))
        .await?
        .click()
        .await?;

    match driver
        .query(By::Id(POST_LOGIN_LANDMARK))
        .wait(wait, POLL_INTERVAL)
        .first()
        .await
    {
        Ok(_) => {
            log::info!("Login successful");
            Ok(())
        }
        Err(_) => Err(SessionError::LoginTimeout(wait)),
    }
}

/// Best-effort visual snapshot for post-mortem inspection of failure paths.
pub async fn save_debug_screenshot(driver: &WebDriver, file_name: &str) {
    match driver.screenshot(Path::new(file_name)).await {
        Ok(_) => log::info!("Saved a screenshot to {}", file_name),
        Err(e) => log::error!("Failed to save screenshot to {}: {:?}", file_name, e),
    }
}
