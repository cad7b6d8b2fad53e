// src/models/config.rs

//! Application configuration structures.
//!
//! All environment-derived knobs (portal URLs, WebDriver endpoint, timeouts,
//! window size) live here, constructed once at startup and passed in;
//! extraction logic reads no ambient state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::LocatorRegistry;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Portal URLs
    #[serde(default)]
    pub portal: PortalConfig,

    /// Browser session behavior
    #[serde(default)]
    pub browser: BrowserConfig,

    /// DOM locator registry
    #[serde(default)]
    pub locators: LocatorRegistry,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.portal.base_url)
            .map_err(|e| AppError::validation(format!("portal.base_url is invalid: {e}")))?;
        if self.browser.webdriver_url.trim().is_empty() {
            return Err(AppError::validation("browser.webdriver_url is empty"));
        }
        if self.browser.login_timeout_secs == 0 {
            return Err(AppError::validation(
                "browser.login_timeout_secs must be > 0",
            ));
        }
        if self.browser.page_timeout_secs == 0 {
            return Err(AppError::validation("browser.page_timeout_secs must be > 0"));
        }
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(AppError::validation("browser window size must be > 0"));
        }
        if self.locators.is_empty() {
            return Err(AppError::validation("No locators defined"));
        }
        Ok(())
    }
}

/// Portal URL layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Root URL of the ERP portal
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default = "defaults::login_path")]
    pub login_path: String,

    #[serde(default = "defaults::dashboard_path")]
    pub dashboard_path: String,

    #[serde(default = "defaults::attendance_path")]
    pub attendance_path: String,

    #[serde(default = "defaults::results_path")]
    pub results_path: String,

    #[serde(default = "defaults::invoices_path")]
    pub invoices_path: String,

    #[serde(default = "defaults::timetable_path")]
    pub timetable_path: String,
}

impl PortalConfig {
    /// Absolute URL for a portal page.
    pub fn page_url(&self, page: PortalPage) -> Result<String> {
        let base = Url::parse(&self.base_url)?;
        let path = match page {
            PortalPage::Login => &self.login_path,
            PortalPage::Dashboard => &self.dashboard_path,
            PortalPage::Attendance => &self.attendance_path,
            PortalPage::Results => &self.results_path,
            PortalPage::Invoices => &self.invoices_path,
            PortalPage::Timetable => &self.timetable_path,
        };
        Ok(base.join(path)?.to_string())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            login_path: defaults::login_path(),
            dashboard_path: defaults::dashboard_path(),
            attendance_path: defaults::attendance_path(),
            results_path: defaults::results_path(),
            invoices_path: defaults::invoices_path(),
            timetable_path: defaults::timetable_path(),
        }
    }
}

/// The six portal pages the scraper knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalPage {
    Login,
    Dashboard,
    Attendance,
    Results,
    Invoices,
    Timetable,
}

/// Browser session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// WebDriver endpoint of a running geckodriver
    #[serde(default = "defaults::webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "defaults::headless")]
    pub headless: bool,

    #[serde(default = "defaults::window_width")]
    pub window_width: u32,

    #[serde(default = "defaults::window_height")]
    pub window_height: u32,

    /// Bounded wait for the post-login readiness signal, in seconds
    #[serde(default = "defaults::login_timeout")]
    pub login_timeout_secs: u64,

    /// Bounded wait for per-page readiness signals, in seconds
    #[serde(default = "defaults::page_timeout")]
    pub page_timeout_secs: u64,

    /// Polling interval for bounded waits, in milliseconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,

    /// Directory for best-effort failure screenshots
    #[serde(default = "defaults::screenshot_dir")]
    pub screenshot_dir: PathBuf,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: defaults::webdriver_url(),
            headless: defaults::headless(),
            window_width: defaults::window_width(),
            window_height: defaults::window_height(),
            login_timeout_secs: defaults::login_timeout(),
            page_timeout_secs: defaults::page_timeout(),
            poll_interval_ms: defaults::poll_interval(),
            screenshot_dir: defaults::screenshot_dir(),
        }
    }
}

/// Login credentials supplied by the caller.
///
/// Deliberately not `Debug`: the password must not end up in logs.
#[derive(Clone)]
pub struct Credentials {
    pub roll_no: String,
    pub password: String,
}

impl Credentials {
    pub fn new(roll_no: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            roll_no: roll_no.into(),
            password: password.into(),
        }
    }

    /// Non-empty checks only; the portal enforces the rest.
    pub fn validate(&self) -> Result<()> {
        if self.roll_no.trim().is_empty() {
            return Err(AppError::validation("roll number is empty"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("password is empty"));
        }
        Ok(())
    }
}

mod defaults {
    use std::path::PathBuf;

    // Portal defaults
    pub fn base_url() -> String {
        "https://erp.superior.edu.pk".into()
    }
    pub fn login_path() -> String {
        "/web/login".into()
    }
    pub fn dashboard_path() -> String {
        "/students/dashboard".into()
    }
    pub fn attendance_path() -> String {
        "/student/attendance".into()
    }
    pub fn results_path() -> String {
        "/student/results".into()
    }
    pub fn invoices_path() -> String {
        "/student/invoices".into()
    }
    pub fn timetable_path() -> String {
        "/student/class/schedule".into()
    }

    // Browser defaults
    pub fn webdriver_url() -> String {
        "http://localhost:4444".into()
    }
    pub fn headless() -> bool {
        true
    }
    pub fn window_width() -> u32 {
        1920
    }
    pub fn window_height() -> u32 {
        1080
    }
    pub fn login_timeout() -> u64 {
        20
    }
    pub fn page_timeout() -> u64 {
        10
    }
    pub fn poll_interval() -> u64 {
        250
    }
    pub fn screenshot_dir() -> PathBuf {
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_page_timeout() {
        let mut config = Config::default();
        config.browser.page_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.portal.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn page_url_joins_path_onto_base() {
        let portal = PortalConfig::default();
        assert_eq!(
            portal.page_url(PortalPage::Login).unwrap(),
            "https://erp.superior.edu.pk/web/login"
        );
        assert_eq!(
            portal.page_url(PortalPage::Timetable).unwrap(),
            "https://erp.superior.edu.pk/student/class/schedule"
        );
    }

    #[test]
    fn credentials_must_be_non_empty() {
        assert!(Credentials::new("21-CS-045", "secret").validate().is_ok());
        assert!(Credentials::new("  ", "secret").validate().is_err());
        assert!(Credentials::new("21-CS-045", "").validate().is_err());
    }
}
