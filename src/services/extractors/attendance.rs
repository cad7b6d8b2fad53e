// src/services/extractors/attendance.rs

//! Attendance extractor.
//!
//! Two-phase: collect per-subject detail links from the summary cards, then
//! visit each link and read four labeled fields. Detail visits are strictly
//! sequential; the session is one shared current-page cursor.

use crate::error::Result;
use crate::models::{AttendanceRecord, PortalPage};
use crate::services::Session;

pub(crate) const REQUIRED_LOCATORS: &[&str] = &[
    "attendance.cards_container",
    "attendance.subject_cards",
    "attendance.card_link",
    "attendance.course_name",
    "attendance.conducted_classes",
    "attendance.attended_classes",
    "attendance.percentage",
];

pub async fn extract(session: &Session) -> Result<Vec<AttendanceRecord>> {
    let browser = session.browser()?;
    let timeout = session.page_timeout();

    browser
        .goto(&session.page_url(PortalPage::Attendance)?)
        .await?;
    let container = browser
        .wait_present(session.locator("attendance.cards_container")?, timeout)
        .await?;
    let cards = browser
        .find_all_in(&container, session.locator("attendance.subject_cards")?)
        .await?;

    // Collect every detail URL up front; navigating away invalidates the
    // card element handles.
    let link_locator = session.locator("attendance.card_link")?;
    let mut detail_urls = Vec::with_capacity(cards.len());
    for card in &cards {
        let link = browser.find_in(card, link_locator).await?;
        // The href property resolves to an absolute URL; the raw attribute
        // may be relative.
        match browser.read_property(&link, "href").await? {
            Some(href) => detail_urls.push(href),
            None => log::warn!("attendance card link carries no href, skipping"),
        }
    }

    let mut records = Vec::with_capacity(detail_urls.len());
    for url in &detail_urls {
        browser.goto(url).await?;
        let name_elem = browser
            .wait_visible(session.locator("attendance.course_name")?, timeout)
            .await?;
        records.push(AttendanceRecord {
            course_name: browser.read_text(&name_elem).await?,
            conducted: read_labeled_field(session, "attendance.conducted_classes").await?,
            attended: read_labeled_field(session, "attendance.attended_classes").await?,
            percentage: read_labeled_field(session, "attendance.percentage").await?,
        });
    }

    log::info!("scraped attendance for {} courses", records.len());
    Ok(records)
}

async fn read_labeled_field(session: &Session, path: &str) -> Result<String> {
    let browser = session.browser()?;
    let elem = browser.find(session.locator(path)?).await?;
    browser.read_text(&elem).await
}
