// src/services/extractors/timetable.rs

//! Timetable extractor.
//!
//! Day groups are walked in document order. Start/end times come straight
//! from the event anchor's `data-start`/`data-end` attributes, not the
//! visible text; the multi-line label is split into positional parts
//! (part 0 = course name, part 2 = venue).

use crate::error::Result;
use crate::models::{DaySchedule, PortalPage, Timetable, TimetableEvent};
use crate::services::Session;

pub(crate) const REQUIRED_LOCATORS: &[&str] = &[
    "timetable.page_header",
    "timetable.day_groups",
    "timetable.day_label",
    "timetable.events",
    "timetable.event_link",
];

const PART_FALLBACK: &str = "N/A";

pub async fn extract(session: &Session) -> Result<Timetable> {
    let browser = session.browser()?;
    let timeout = session.page_timeout();

    browser
        .goto(&session.page_url(PortalPage::Timetable)?)
        .await?;
    browser
        .wait_present(session.locator("timetable.page_header")?, timeout)
        .await?;

    let groups = browser
        .find_all(session.locator("timetable.day_groups")?)
        .await?;
    let day_locator = session.locator("timetable.day_label")?;
    let events_locator = session.locator("timetable.events")?;
    let link_locator = session.locator("timetable.event_link")?;

    let mut days = Vec::with_capacity(groups.len());
    for group in &groups {
        let day_elem = browser.find_in(group, day_locator).await?;
        let day = browser.read_text(&day_elem).await?;

        let events = browser.find_all_in(group, events_locator).await?;
        let mut entries = Vec::with_capacity(events.len());
        for event in &events {
            let anchor = browser.find_in(event, link_locator).await?;
            let start = browser
                .read_attribute(&anchor, "data-start")
                .await?
                .unwrap_or_else(|| PART_FALLBACK.to_string());
            let end = browser
                .read_attribute(&anchor, "data-end")
                .await?
                .unwrap_or_else(|| PART_FALLBACK.to_string());
            let label = browser.read_text(&anchor).await?;
            let (details, venue) = split_event_label(&label);
            entries.push(TimetableEvent {
                time: format!("{start} - {end}"),
                details,
                venue,
            });
        }
        days.push(DaySchedule { day, events: entries });
    }

    let timetable = Timetable::new(days);
    log::info!("found schedule for {} days", timetable.day_count());
    Ok(timetable)
}

/// Split a multi-line event label into (course name, venue).
///
/// The label renders as name / instructor / venue on separate lines. Fewer
/// parts than expected yield `"N/A"` for the missing part.
fn split_event_label(label: &str) -> (String, String) {
    let flattened = label.replace('\n', " | ");
    let parts: Vec<&str> = flattened.split('|').map(str::trim).collect();
    let details = parts
        .first()
        .map(|p| p.to_string())
        .unwrap_or_else(|| flattened.trim().to_string());
    let venue = parts
        .get(2)
        .map(|p| p.to_string())
        .unwrap_or_else(|| PART_FALLBACK.to_string());
    (details, venue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_line_label_yields_name_and_venue() {
        let (details, venue) = split_event_label("Calculus I\nDr. X\nRoom 204");
        assert_eq!(details, "Calculus I");
        assert_eq!(venue, "Room 204");
    }

    #[test]
    fn single_part_label_falls_back_for_venue() {
        let (details, venue) = split_event_label("Calculus I");
        assert_eq!(details, "Calculus I");
        assert_eq!(venue, "N/A");
    }

    #[test]
    fn two_part_label_still_lacks_venue() {
        let (details, venue) = split_event_label("Calculus I\nDr. X");
        assert_eq!(details, "Calculus I");
        assert_eq!(venue, "N/A");
    }

    #[test]
    fn extra_parts_beyond_venue_are_ignored() {
        let (details, venue) = split_event_label("Calculus I\nDr. X\nRoom 204\nSection B");
        assert_eq!(details, "Calculus I");
        assert_eq!(venue, "Room 204");
    }
}
