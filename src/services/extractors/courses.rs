// src/services/extractors/courses.rs

//! Enrolled-courses extractor.
//!
//! The course cards' visible markup is unreliable, so every field is derived
//! from one `textContent` blob per card: positional lines for name and code,
//! a labeled line for credits, and a substring check over the
//! whitespace-normalized text for the status.

use crate::error::Result;
use crate::models::{CourseStatus, EnrolledCourse, PortalPage};
use crate::services::Session;
use crate::utils::normalize_whitespace;

pub(crate) const REQUIRED_LOCATORS: &[&str] = &["courses.container", "courses.cards"];

const STATUS_ACTIVE: &str = "Active Class";
const STATUS_GRADING: &str = "Grading in progress";
const CREDITS_LABEL: &str = "Credits :";
const FIELD_FALLBACK: &str = "N/A";

pub async fn extract(session: &Session) -> Result<Vec<EnrolledCourse>> {
    let browser = session.browser()?;
    let timeout = session.page_timeout();

    // The cards live on the dashboard, not on a page of their own.
    browser
        .goto(&session.page_url(PortalPage::Dashboard)?)
        .await?;
    browser
        .wait_present(session.locator("courses.container")?, timeout)
        .await?;

    let cards = browser
        .find_all(session.locator("courses.cards")?)
        .await?;

    let mut courses = Vec::new();
    for card in &cards {
        let blob = browser
            .read_property(card, "textContent")
            .await?
            .unwrap_or_default();
        if let Some(course) = parse_course_card(&blob) {
            courses.push(course);
        }
    }

    log::info!("parsed {} enrolled courses", courses.len());
    Ok(courses)
}

/// Parse one card's raw text blob. Empty blobs yield `None`.
fn parse_course_card(blob: &str) -> Option<EnrolledCourse> {
    let trimmed = blob.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let course_name = lines.first()?.to_string();
    let course_code = lines
        .get(1)
        .map(|line| line.to_string())
        .unwrap_or_else(|| FIELD_FALLBACK.to_string());
    let credits = lines
        .iter()
        .position(|line| *line == CREDITS_LABEL)
        .and_then(|idx| lines.get(idx + 1))
        .map(|line| line.to_string())
        .unwrap_or_else(|| FIELD_FALLBACK.to_string());

    let status = classify_status(&normalize_whitespace(trimmed));

    Some(EnrolledCourse {
        course_name,
        course_code,
        credits,
        status,
    })
}

/// Case-sensitive substring classification; first match in source order
/// wins, so a card carrying both markers is always `ActiveClass`.
fn classify_status(normalized: &str) -> CourseStatus {
    if normalized.contains(STATUS_ACTIVE) {
        CourseStatus::ActiveClass
    } else if normalized.contains(STATUS_GRADING) {
        CourseStatus::GradingInProgress
    } else {
        CourseStatus::NotAvailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_card() {
        let blob = "\n  Data Structures \n CSC-201 \n Credits : \n 3 \n Active Class \n";
        let course = parse_course_card(blob).unwrap();
        assert_eq!(course.course_name, "Data Structures");
        assert_eq!(course.course_code, "CSC-201");
        assert_eq!(course.credits, "3");
        assert_eq!(course.status, CourseStatus::ActiveClass);
    }

    #[test]
    fn missing_lines_fall_back_to_na() {
        let course = parse_course_card("Data Structures").unwrap();
        assert_eq!(course.course_code, "N/A");
        assert_eq!(course.credits, "N/A");
        assert_eq!(course.status, CourseStatus::NotAvailable);
    }

    #[test]
    fn empty_blob_is_skipped() {
        assert!(parse_course_card("   \n  ").is_none());
    }

    #[test]
    fn status_priority_is_deterministic() {
        // Both markers present: the first-checked substring wins.
        let both = "Course X Active Class Grading in progress";
        assert_eq!(classify_status(both), CourseStatus::ActiveClass);
        assert_eq!(
            classify_status("Course X Grading in progress"),
            CourseStatus::GradingInProgress
        );
        assert_eq!(classify_status("Course X"), CourseStatus::NotAvailable);
    }

    #[test]
    fn status_match_is_case_sensitive() {
        assert_eq!(
            classify_status("course x active class"),
            CourseStatus::NotAvailable
        );
    }

    #[test]
    fn status_detected_across_newlines_in_raw_blob() {
        let blob = "Course X\nGrading in\nprogress";
        // Raw text splits the marker across lines; normalization restores it.
        let course = parse_course_card(blob).unwrap();
        assert_eq!(course.status, CourseStatus::GradingInProgress);
    }
}
