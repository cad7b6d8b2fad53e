// src/services/session.rs

//! Authenticated portal session.
//!
//! Owns one browser instance for the duration of one scrape. The session is
//! a single mutable cursor over "current page": it is passed by reference to
//! each extractor and never shared across concurrent tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{Config, Credentials, Locator, PortalPage};
use crate::services::Browser;

/// Locator paths the session itself depends on.
pub(crate) const REQUIRED_LOCATORS: &[&str] = &[
    "login.roll_no_field",
    "login.password_field",
    "login.submit_button",
    "login.error_banner",
    "dashboard.student_name",
];

/// Reported when the failure banner is missing or unreadable.
const GENERIC_LOGIN_FAILURE: &str = "Invalid credentials or the page timed out";

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Authenticating,
    Authenticated,
    Failed,
    Closed,
}

/// One authenticated browser session against the portal.
pub struct Session {
    config: Arc<Config>,
    browser: Option<Browser>,
    state: SessionState,
}

impl Session {
    /// Launch the browser; the session starts in `Idle`.
    pub async fn open(config: Arc<Config>) -> Result<Self> {
        let browser = Browser::launch(&config.browser).await?;
        Ok(Self {
            config,
            browser: Some(browser),
            state: SessionState::Idle,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The live browser, or a `Config` error after `close()`.
    pub fn browser(&self) -> Result<&Browser> {
        self.browser
            .as_ref()
            .ok_or_else(|| AppError::config("session is closed"))
    }

    /// Resolve a locator path against the configured registry.
    pub fn locator(&self, path: &str) -> Result<&Locator> {
        self.config.locators.resolve(path)
    }

    /// Absolute URL of a portal page.
    pub fn page_url(&self, page: PortalPage) -> Result<String> {
        self.config.portal.page_url(page)
    }

    /// Bounded wait for per-page readiness signals.
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.config.browser.page_timeout_secs)
    }

    /// Bounded wait for the login confirmation signal.
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.config.browser.login_timeout_secs)
    }

    /// Submit credentials and confirm the login.
    ///
    /// Success is detected by waiting for the dashboard student-name element,
    /// which only exists post-login. On timeout the page error banner is read
    /// for a human-readable reason; either way the failure comes back as a
    /// typed [`AppError::Authentication`]. No retry is attempted here.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(AppError::config(format!(
                "login attempted in state {:?}",
                self.state
            )));
        }
        self.state = SessionState::Authenticating;
        match self.submit_credentials(credentials).await {
            Ok(()) => {
                self.state = SessionState::Authenticated;
                log::info!("login confirmed for {}", credentials.roll_no);
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    async fn submit_credentials(&self, credentials: &Credentials) -> Result<()> {
        let browser = self.browser()?;
        let timeout = self.login_timeout();

        browser.goto(&self.page_url(PortalPage::Login)?).await?;

        let roll_field = browser
            .wait_present(self.locator("login.roll_no_field")?, timeout)
            .await?;
        browser.send_keys(&roll_field, &credentials.roll_no).await?;

        let password_field = browser.find(self.locator("login.password_field")?).await?;
        browser
            .send_keys(&password_field, &credentials.password)
            .await?;

        let submit = browser.find(self.locator("login.submit_button")?).await?;
        browser.click(&submit).await?;

        let name_locator = self.locator("dashboard.student_name")?;
        if browser.wait_visible(name_locator, timeout).await.is_err() {
            let reason = self.read_failure_reason().await;
            return Err(AppError::authentication(reason));
        }
        Ok(())
    }

    /// Pull a human-readable reason off the failed login page, if the portal
    /// rendered one.
    async fn read_failure_reason(&self) -> String {
        let Ok(browser) = self.browser() else {
            return GENERIC_LOGIN_FAILURE.to_string();
        };
        let Ok(locator) = self.config.locators.resolve("login.error_banner") else {
            return GENERIC_LOGIN_FAILURE.to_string();
        };
        match browser.find(locator).await {
            Ok(banner) => match browser.read_text(&banner).await {
                Ok(text) if !text.is_empty() => text,
                _ => GENERIC_LOGIN_FAILURE.to_string(),
            },
            Err(_) => GENERIC_LOGIN_FAILURE.to_string(),
        }
    }

    /// Best-effort page screenshot for failure diagnostics.
    pub async fn capture_failure(&self, label: &str) -> Result<PathBuf> {
        let browser = self.browser()?;
        let bytes = browser.screenshot().await?;
        let dir = &self.config.browser.screenshot_dir;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{label}_failure_screenshot.png"));
        tokio::fs::write(&path, &bytes).await?;
        log::info!("failure screenshot saved to {}", path.display());
        Ok(path)
    }

    /// Release the browser. Valid from any state, idempotent, and never
    /// fails: quit errors are logged and discarded.
    pub async fn close(&mut self) {
        if let Some(browser) = self.browser.take() {
            if let Err(err) = browser.quit().await {
                log::warn!("browser quit failed: {err}");
            }
        }
        self.state = SessionState::Closed;
    }
}
