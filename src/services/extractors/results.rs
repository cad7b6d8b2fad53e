// src/services/extractors/results.rs

//! Results extractor: two-level semester/course table.
//!
//! The portal renders one flat `<tbody>` where semester summaries
//! (`table-parent-row`) interleave with their course lines
//! (`table-child-row`). Rows are classified by CSS class and folded onto the
//! nearest preceding parent. Child rows render collapsed by default, so
//! their cells are read through the `textContent` property instead of the
//! visible text.

use crate::error::Result;
use crate::models::{CourseResult, PortalPage, SemesterResult};
use crate::services::Session;

pub(crate) const REQUIRED_LOCATORS: &[&str] = &[
    "results.page_header",
    "results.previous_courses_tab",
    "results.term_summary_rows",
    "results.table_rows",
    "results.row_cells",
];

const PARENT_ROW_CLASS: &str = "table-parent-row";
const CHILD_ROW_CLASS: &str = "table-child-row";

/// A table row as read off the page: its class attribute plus cell texts.
#[derive(Debug)]
struct RawRow {
    class_attr: String,
    cells: Vec<String>,
}

pub async fn extract(session: &Session) -> Result<Vec<SemesterResult>> {
    let browser = session.browser()?;
    let timeout = session.page_timeout();

    browser.goto(&session.page_url(PortalPage::Results)?).await?;
    browser
        .wait_present(session.locator("results.page_header")?, timeout)
        .await?;

    // Past semesters only render after switching tabs.
    let tab = browser
        .wait_clickable(session.locator("results.previous_courses_tab")?, timeout)
        .await?;
    browser.click(&tab).await?;
    browser
        .wait_present(session.locator("results.term_summary_rows")?, timeout)
        .await?;

    let rows = browser
        .find_all(session.locator("results.table_rows")?)
        .await?;
    let cell_locator = session.locator("results.row_cells")?;

    let mut raw_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let class_attr = browser
            .read_attribute(row, "class")
            .await?
            .unwrap_or_default();
        let cells = browser.find_all_in(row, cell_locator).await?;
        let mut texts = Vec::with_capacity(cells.len());
        for cell in &cells {
            let text = if class_attr.contains(CHILD_ROW_CLASS) {
                browser
                    .read_property(cell, "textContent")
                    .await?
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            } else {
                browser.read_text(cell).await?
            };
            texts.push(text);
        }
        raw_rows.push(RawRow { class_attr, cells: texts });
    }

    let results = fold_rows(raw_rows);
    log::info!("scraped detailed results for {} semesters", results.len());
    Ok(results)
}

/// Fold the flat row sequence into semesters with attached course lines.
///
/// A child row encountered before any parent has nothing to attach to and is
/// dropped. A malformed parent row (fewer than 6 cells) is skipped without
/// disturbing the current-parent cursor.
fn fold_rows(rows: Vec<RawRow>) -> Vec<SemesterResult> {
    let mut semesters: Vec<SemesterResult> = Vec::new();
    for row in rows {
        if row.class_attr.contains(PARENT_ROW_CLASS) {
            if row.cells.len() >= 6 {
                semesters.push(SemesterResult {
                    term: row.cells[0].clone(),
                    gpa: row.cells[4].clone(),
                    cgpa: row.cells[5].clone(),
                    courses: Vec::new(),
                });
            }
        } else if row.class_attr.contains(CHILD_ROW_CLASS) && row.cells.len() == 4 {
            if let Some(current) = semesters.last_mut() {
                current.courses.push(CourseResult {
                    course_name: row.cells[0].clone(),
                    credits: row.cells[1].clone(),
                    marks_obtained: row.cells[2].clone(),
                    final_grade: row.cells[3].clone(),
                });
            }
        }
    }
    semesters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(term: &str, gpa: &str, cgpa: &str) -> RawRow {
        RawRow {
            class_attr: "odd table-parent-row".to_string(),
            cells: vec![
                term.to_string(),
                "Fall".to_string(),
                "2023".to_string(),
                "15.0".to_string(),
                gpa.to_string(),
                cgpa.to_string(),
            ],
        }
    }

    fn child(name: &str) -> RawRow {
        RawRow {
            class_attr: "table-child-row".to_string(),
            cells: vec![
                name.to_string(),
                "3".to_string(),
                "88".to_string(),
                "A-".to_string(),
            ],
        }
    }

    #[test]
    fn children_attach_to_nearest_preceding_parent() {
        let rows = vec![
            parent("Fall 2023", "3.5", "3.5"),
            child("Calculus I"),
            child("Physics I"),
            parent("Spring 2024", "3.7", "3.6"),
            child("Calculus II"),
        ];
        let results = fold_rows(rows);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].term, "Fall 2023");
        assert_eq!(results[0].courses.len(), 2);
        assert_eq!(results[0].courses[1].course_name, "Physics I");
        assert_eq!(results[1].courses.len(), 1);
        assert_eq!(results[1].courses[0].course_name, "Calculus II");
    }

    #[test]
    fn leading_child_without_parent_is_dropped() {
        let rows = vec![child("Orphan"), parent("Fall 2023", "3.5", "3.5")];
        let results = fold_rows(rows);
        assert_eq!(results.len(), 1);
        assert!(results[0].courses.is_empty());
    }

    #[test]
    fn short_parent_row_is_skipped_and_cursor_kept() {
        let short_parent = RawRow {
            class_attr: "table-parent-row".to_string(),
            cells: vec!["Fall 2024".to_string()],
        };
        let rows = vec![
            parent("Fall 2023", "3.5", "3.5"),
            short_parent,
            child("Still attaches to Fall 2023"),
        ];
        let results = fold_rows(rows);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].courses.len(), 1);
    }

    #[test]
    fn child_with_wrong_cell_count_is_ignored() {
        let odd_child = RawRow {
            class_attr: "table-child-row".to_string(),
            cells: vec!["Calculus I".to_string(), "3".to_string()],
        };
        let rows = vec![parent("Fall 2023", "3.5", "3.5"), odd_child];
        let results = fold_rows(rows);
        assert!(results[0].courses.is_empty());
    }

    #[test]
    fn unclassified_rows_are_ignored() {
        let header = RawRow {
            class_attr: "table-header".to_string(),
            cells: vec!["Term".to_string()],
        };
        assert!(fold_rows(vec![header]).is_empty());
    }
}
