// src/models/locator.rs

//! Locator registry: semantic field names mapped to portal DOM selectors.
//!
//! Extraction logic never embeds selector expressions; it asks the registry
//! for a dotted path like `"dashboard.student_name"`. Markup drift is fixed
//! by editing the registry, not the extractors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thirtyfour::By;

use crate::error::{AppError, Result};

/// Selector strategy for finding an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    Id,
    Css,
    XPath,
    Tag,
}

/// A (kind, expression) pair identifying how to find an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locator {
    pub kind: LocatorKind,
    pub expr: String,
}

impl Locator {
    /// Create a locator.
    pub fn new(kind: LocatorKind, expr: impl Into<String>) -> Self {
        Self {
            kind,
            expr: expr.into(),
        }
    }

    /// Convert to a WebDriver selector.
    pub fn by(&self) -> By {
        match self.kind {
            LocatorKind::Id => By::Id(self.expr.as_str()),
            LocatorKind::Css => By::Css(self.expr.as_str()),
            LocatorKind::XPath => By::XPath(self.expr.as_str()),
            LocatorKind::Tag => By::Tag(self.expr.as_str()),
        }
    }
}

/// Static mapping from dotted field paths to portal locators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocatorRegistry {
    entries: HashMap<String, Locator>,
}

impl LocatorRegistry {
    /// Look up a locator by its dotted path.
    ///
    /// An unknown path is a programming error, not a runtime condition, and
    /// is reported as [`AppError::Locator`] so it fails the scrape instead of
    /// silently producing an empty section.
    pub fn resolve(&self, path: &str) -> Result<&Locator> {
        self.entries
            .get(path)
            .ok_or_else(|| AppError::Locator(path.to_string()))
    }

    /// Number of registered locators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LocatorRegistry {
    fn default() -> Self {
        let entries = defaults::portal_locators()
            .iter()
            .map(|(path, kind, expr)| ((*path).to_string(), Locator::new(*kind, *expr)))
            .collect();
        Self { entries }
    }
}

mod defaults {
    use super::LocatorKind::{self, Css, Id, Tag, XPath};

    /// Verified locators for the Superior ERP portal.
    pub fn portal_locators() -> &'static [(&'static str, LocatorKind, &'static str)] {
        &[
            // Login page
            ("login.roll_no_field", Id, "login"),
            ("login.password_field", Id, "password"),
            ("login.submit_button", XPath, "//button[@type='submit']"),
            (
                "login.error_banner",
                XPath,
                "//div[contains(@class, 'alert-danger')]",
            ),
            // Dashboard
            (
                "dashboard.student_name",
                XPath,
                "//h2[@class='heading_b']/span[@class='uk-text-truncate']",
            ),
            (
                "dashboard.academic_info_box",
                XPath,
                "//div[contains(text(), 'Academic standings:')]",
            ),
            (
                "dashboard.credits_info_box",
                XPath,
                "//div[contains(text(), 'Completed Cr.')]",
            ),
            (
                "dashboard.today_classes_box",
                XPath,
                "//div[contains(text(), 'Today Classes:')]",
            ),
            // Attendance summary and per-subject detail pages
            ("attendance.cards_container", Id, "hierarchical-show"),
            (
                "attendance.subject_cards",
                XPath,
                ".//div[@class='md-card md-card-hover']",
            ),
            ("attendance.card_link", Tag, "a"),
            (
                "attendance.course_name",
                XPath,
                "//b[normalize-space()='Course :']/following-sibling::span",
            ),
            (
                "attendance.conducted_classes",
                XPath,
                "//b[normalize-space()='Number of classes Conducted :']/following-sibling::span",
            ),
            (
                "attendance.attended_classes",
                XPath,
                "//b[normalize-space()='Number of classes Attended :']/following-sibling::span",
            ),
            (
                "attendance.percentage",
                XPath,
                "//b[normalize-space()='Attendance Percentage:']/following-sibling::span",
            ),
            // Results
            (
                "results.page_header",
                XPath,
                "//h3[contains(text(), 'Results')]",
            ),
            (
                "results.previous_courses_tab",
                XPath,
                "//a[normalize-space()='Previous Courses']",
            ),
            (
                "results.term_summary_rows",
                XPath,
                "//tr[contains(@class, 'table-parent-row')]",
            ),
            (
                "results.table_rows",
                XPath,
                "//table[contains(@class, 'table_tree')]/tbody/tr",
            ),
            ("results.row_cells", Tag, "td"),
            // Invoices
            (
                "invoices.page_header",
                XPath,
                "//h3[contains(text(), 'Invoices List')]",
            ),
            (
                "invoices.table_rows",
                XPath,
                "//table[contains(@class, 'table_check')]/tbody/tr",
            ),
            ("invoices.row_cells", Tag, "td"),
            // Timetable
            (
                "timetable.page_header",
                XPath,
                "//h3[contains(text(), 'Class Schedule')]",
            ),
            (
                "timetable.day_groups",
                XPath,
                "//li[@class='cd-schedule__group']",
            ),
            (
                "timetable.day_label",
                XPath,
                ".//div[@class='cd-schedule__top-info']/span",
            ),
            (
                "timetable.events",
                XPath,
                ".//li[@class='cd-schedule__event']",
            ),
            ("timetable.event_link", Tag, "a"),
            // Enrolled course cards (rendered on the dashboard)
            ("courses.container", Id, "hierarchical-show"),
            ("courses.cards", Css, "#hierarchical-show a"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_path() {
        let registry = LocatorRegistry::default();
        let locator = registry.resolve("dashboard.student_name").unwrap();
        assert_eq!(locator.kind, LocatorKind::XPath);
    }

    #[test]
    fn resolve_unknown_path_is_locator_error() {
        let registry = LocatorRegistry::default();
        match registry.resolve("dashboard.nope") {
            Err(AppError::Locator(path)) => assert_eq!(path, "dashboard.nope"),
            other => panic!("expected Locator error, got {other:?}"),
        }
    }

    #[test]
    fn default_registry_is_populated() {
        assert!(!LocatorRegistry::default().is_empty());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&LocatorKind::XPath).unwrap();
        assert_eq!(json, r#""xpath""#);
    }
}
