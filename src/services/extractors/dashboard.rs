// src/services/extractors/dashboard.rs

//! Dashboard extractor: the student profile block.
//!
//! The dashboard renders free-text info boxes, so fields are pulled with
//! label-anchored capture. Each label is matched independently; a missing
//! label degrades only that one field to the `"Not Found"` sentinel.

use crate::error::Result;
use crate::models::{NOT_FOUND, PortalPage, Profile};
use crate::services::Session;
use crate::utils::{capture, value_after_colon};

pub(crate) const REQUIRED_LOCATORS: &[&str] = &[
    "dashboard.student_name",
    "dashboard.academic_info_box",
    "dashboard.credits_info_box",
    "dashboard.today_classes_box",
];

pub async fn extract(session: &Session) -> Result<Profile> {
    let browser = session.browser()?;
    browser.goto(&session.page_url(PortalPage::Dashboard)?).await?;

    // The student name doubles as the page readiness signal; the info boxes
    // render alongside it.
    let name_elem = browser
        .wait_visible(
            session.locator("dashboard.student_name")?,
            session.login_timeout(),
        )
        .await?;
    let student_name = browser.read_text(&name_elem).await?;

    let academic = read_info_box(session, "dashboard.academic_info_box").await?;
    let credits = read_info_box(session, "dashboard.credits_info_box").await?;
    let today = read_info_box(session, "dashboard.today_classes_box").await?;

    log::info!("dashboard scraped for {student_name}");
    Ok(parse_profile(
        student_name,
        academic.as_deref(),
        credits.as_deref(),
        today.as_deref(),
    ))
}

/// Read one info box's text; an absent box degrades to `None` instead of
/// failing the extractor.
async fn read_info_box(session: &Session, path: &str) -> Result<Option<String>> {
    let browser = session.browser()?;
    let locator = session.locator(path)?;
    match browser.find(locator).await {
        Ok(elem) => Ok(Some(browser.read_text(&elem).await?)),
        Err(err) => {
            log::warn!("dashboard box {path} not found: {err}");
            Ok(None)
        }
    }
}

fn parse_profile(
    student_name: String,
    academic: Option<&str>,
    credits: Option<&str>,
    today: Option<&str>,
) -> Profile {
    let field = |text: Option<&str>, pattern: &str| {
        text.and_then(|t| capture(t, pattern))
            .unwrap_or_else(|| NOT_FOUND.to_string())
    };

    Profile {
        student_name,
        academic_standing: field(academic, r"Academic standings:\s*(\w+)"),
        semester: field(academic, r"Semester:\s*(\w+)"),
        cgpa: field(academic, r"CGPA:\s*([\d.]+)"),
        completed_credits: field(credits, r"Completed Cr\. / Total Cr:\s*([\d.]+)"),
        inprogress_credits: field(credits, r"Inprogress Cr :\s*([\d.]+)"),
        today_classes: today
            .map(value_after_colon)
            .unwrap_or_else(|| NOT_FOUND.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_labels() {
        let academic = "Academic standings: Good\nSemester: 5\nCGPA: 3.41";
        let credits = "Completed Cr. / Total Cr: 84.0\nInprogress Cr : 15.0";
        let today = "Today Classes: 3";

        let profile = parse_profile(
            "Jane Doe".to_string(),
            Some(academic),
            Some(credits),
            Some(today),
        );
        assert_eq!(profile.academic_standing, "Good");
        assert_eq!(profile.semester, "5");
        assert_eq!(profile.cgpa, "3.41");
        assert_eq!(profile.completed_credits, "84.0");
        assert_eq!(profile.inprogress_credits, "15.0");
        assert_eq!(profile.today_classes, "3");
    }

    #[test]
    fn missing_label_degrades_only_that_field() {
        let academic = "Semester: 5";
        let profile = parse_profile("Jane Doe".to_string(), Some(academic), None, None);
        assert_eq!(profile.academic_standing, NOT_FOUND);
        assert_eq!(profile.semester, "5");
        assert_eq!(profile.cgpa, NOT_FOUND);
        assert_eq!(profile.completed_credits, NOT_FOUND);
        assert_eq!(profile.today_classes, NOT_FOUND);
    }

    #[test]
    fn absent_boxes_keep_the_name() {
        let profile = parse_profile("Jane Doe".to_string(), None, None, None);
        assert_eq!(profile.student_name, "Jane Doe");
        assert_eq!(profile.cgpa, NOT_FOUND);
    }
}
