// src/services/browser.rs

//! Browser capability wrapper.
//!
//! The one module that touches the WebDriver client. Everything else in the
//! crate speaks this surface: navigate, find, bounded waits, text/attribute
//! reads, click, send-keys, screenshot, quit. Swapping the automation engine
//! means rewriting this file only.

use std::time::Duration;

use thirtyfour::prelude::*;

use crate::error::Result;
use crate::models::{BrowserConfig, Locator};

/// A live browser instance driven over the WebDriver protocol.
pub struct Browser {
    driver: WebDriver,
    poll: Duration,
}

impl Browser {
    /// Launch a headless Firefox session against the configured endpoint
    /// and fix the viewport size.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::firefox();
        if config.headless {
            caps.set_headless()?;
        }
        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        driver
            .set_window_rect(0, 0, config.window_width, config.window_height)
            .await?;
        Ok(Self {
            driver,
            poll: Duration::from_millis(config.poll_interval_ms),
        })
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Find a single element, failing immediately if absent.
    pub async fn find(&self, locator: &Locator) -> Result<WebElement> {
        Ok(self.driver.find(locator.by()).await?)
    }

    pub async fn find_all(&self, locator: &Locator) -> Result<Vec<WebElement>> {
        Ok(self.driver.find_all(locator.by()).await?)
    }

    /// Find a single element scoped under another element.
    pub async fn find_in(&self, scope: &WebElement, locator: &Locator) -> Result<WebElement> {
        Ok(scope.find(locator.by()).await?)
    }

    pub async fn find_all_in(
        &self,
        scope: &WebElement,
        locator: &Locator,
    ) -> Result<Vec<WebElement>> {
        Ok(scope.find_all(locator.by()).await?)
    }

    /// Wait until an element exists in the DOM, visible or not.
    pub async fn wait_present(&self, locator: &Locator, timeout: Duration) -> Result<WebElement> {
        let elem = self
            .driver
            .query(locator.by())
            .wait(timeout, self.poll)
            .first()
            .await?;
        Ok(elem)
    }

    /// Wait until an element exists and is displayed.
    pub async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<WebElement> {
        let elem = self
            .driver
            .query(locator.by())
            .wait(timeout, self.poll)
            .first()
            .await?;
        elem.wait_until()
            .wait(timeout, self.poll)
            .displayed()
            .await?;
        Ok(elem)
    }

    /// Wait until an element is displayed and enabled.
    pub async fn wait_clickable(&self, locator: &Locator, timeout: Duration) -> Result<WebElement> {
        let elem = self
            .driver
            .query(locator.by())
            .wait(timeout, self.poll)
            .first()
            .await?;
        elem.wait_until()
            .wait(timeout, self.poll)
            .clickable()
            .await?;
        Ok(elem)
    }

    /// Visible text of an element, trimmed of surrounding whitespace.
    pub async fn read_text(&self, elem: &WebElement) -> Result<String> {
        Ok(elem.text().await?.trim().to_string())
    }

    /// A DOM attribute value, if the attribute exists.
    pub async fn read_attribute(&self, elem: &WebElement, name: &str) -> Result<Option<String>> {
        Ok(elem.attr(name).await?)
    }

    /// A DOM property value. `textContent` reads through CSS visibility,
    /// which `read_text` does not.
    pub async fn read_property(&self, elem: &WebElement, name: &str) -> Result<Option<String>> {
        Ok(elem.prop(name).await?)
    }

    pub async fn click(&self, elem: &WebElement) -> Result<()> {
        elem.click().await?;
        Ok(())
    }

    pub async fn send_keys(&self, elem: &WebElement, text: &str) -> Result<()> {
        elem.send_keys(text).await?;
        Ok(())
    }

    /// PNG screenshot of the current page.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.driver.screenshot_as_png().await?)
    }

    /// Shut the browser down, releasing the WebDriver session.
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
