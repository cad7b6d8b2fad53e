// src/models/record.rs

//! The normalized student record and its section types.
//!
//! A [`Record`] is created fresh per scrape and replaced as a whole on
//! re-scrape. Each section is optional: an absent section means that one
//! page's extractor failed, not that the scrape failed. A present `error`
//! field means login failed and every other field is absent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel for a field the page rendered but could not be parsed.
///
/// Distinct from absence: the extractor reached the page and found the
/// containing block, but a label did not match.
pub const NOT_FOUND: &str = "Not Found";

/// Aggregate snapshot of one student's portal state at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Roll number the snapshot belongs to; empty on a failed scrape
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub roll_no: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Vec<AttendanceRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_results: Option<Vec<SemesterResult>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<Financials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timetable: Option<Timetable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_courses: Option<Vec<EnrolledCourse>>,

    /// Present only when login failed; callers must check this first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Record {
    /// Create an empty record for a roll number, ready for section merges.
    pub fn new(roll_no: impl Into<String>) -> Self {
        Self {
            roll_no: roll_no.into(),
            ..Self::default()
        }
    }

    /// Create the degraded record returned when login fails.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of populated sections (out of six).
    pub fn section_count(&self) -> usize {
        [
            self.profile.is_some(),
            self.attendance.is_some(),
            self.semester_results.is_some(),
            self.financials.is_some(),
            self.timetable.is_some(),
            self.enrolled_courses.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Student profile scraped from the dashboard.
///
/// All fields are free-text as rendered by the portal; [`NOT_FOUND`] marks a
/// label that did not match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub student_name: String,
    pub academic_standing: String,
    pub semester: String,
    pub cgpa: String,
    pub completed_credits: String,
    pub inprogress_credits: String,
    pub today_classes: String,
}

/// Per-subject attendance figures.
///
/// Numeric fields stay string-encoded because the portal renders them as
/// text; consumers coerce and must tolerate coercion failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub course_name: String,
    pub conducted: String,
    pub attended: String,
    pub percentage: String,
}

/// One semester's summary with its course lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SemesterResult {
    pub term: String,
    pub gpa: String,
    pub cgpa: String,
    pub courses: Vec<CourseResult>,
}

/// A single course line under a semester summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseResult {
    pub course_name: String,
    pub credits: String,
    pub marks_obtained: String,
    pub final_grade: String,
}

/// Aggregate financial position; no per-invoice rows are retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Financials {
    pub total_remaining_balance: f64,
}

/// Weekly class schedule, days kept in portal document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Timetable {
    pub days: Vec<DaySchedule>,
}

impl Timetable {
    pub fn new(days: Vec<DaySchedule>) -> Self {
        Self { days }
    }

    /// Events for a weekday, if the portal listed that day.
    pub fn events_for(&self, day: &str) -> Option<&[TimetableEvent]> {
        self.days
            .iter()
            .find(|schedule| schedule.day == day)
            .map(|schedule| schedule.events.as_slice())
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

/// One weekday's ordered events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: String,
    pub events: Vec<TimetableEvent>,
}

/// A single timetable slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimetableEvent {
    /// `"<start> - <end>"` as read from the event's data attributes
    pub time: String,
    pub details: String,
    pub venue: String,
}

/// A course the student is currently enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub course_name: String,
    pub course_code: String,
    pub credits: String,
    pub status: CourseStatus,
}

/// Closed status classification surfaced to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    #[serde(rename = "Active Class")]
    ActiveClass,
    #[serde(rename = "Grading in progress")]
    GradingInProgress,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CourseStatus::ActiveClass => "Active Class",
            CourseStatus::GradingInProgress => "Grading in progress",
            CourseStatus::NotAvailable => "N/A",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn keys(record: &Record) -> Vec<String> {
        match serde_json::to_value(record).unwrap() {
            Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn failed_record_serializes_to_error_alone() {
        let record = Record::failed("Login Failed: Invalid credentials or the page timed out.");
        assert_eq!(keys(&record), vec!["error"]);
    }

    #[test]
    fn fresh_record_serializes_to_roll_no_alone() {
        let record = Record::new("21-CS-045");
        assert_eq!(keys(&record), vec!["roll_no"]);
        assert_eq!(record.section_count(), 0);
    }

    #[test]
    fn absent_section_does_not_invalidate_the_rest() {
        let mut record = Record::new("21-CS-045");
        record.financials = Some(Financials {
            total_remaining_balance: 150.0,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("attendance").is_none());
        assert_eq!(
            json["financials"]["total_remaining_balance"],
            Value::from(150.0)
        );
        assert_eq!(record.section_count(), 1);
    }

    #[test]
    fn course_status_serializes_to_portal_labels() {
        assert_eq!(
            serde_json::to_string(&CourseStatus::ActiveClass).unwrap(),
            r#""Active Class""#
        );
        assert_eq!(
            serde_json::to_string(&CourseStatus::GradingInProgress).unwrap(),
            r#""Grading in progress""#
        );
        assert_eq!(
            serde_json::to_string(&CourseStatus::NotAvailable).unwrap(),
            r#""N/A""#
        );
    }

    #[test]
    fn timetable_lookup_by_day() {
        let timetable = Timetable::new(vec![DaySchedule {
            day: "Monday".to_string(),
            events: vec![TimetableEvent {
                time: "08:30 - 09:45".to_string(),
                details: "Calculus I".to_string(),
                venue: "Room 204".to_string(),
            }],
        }]);
        assert_eq!(timetable.events_for("Monday").unwrap().len(), 1);
        assert!(timetable.events_for("Sunday").is_none());
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = Record::new("21-CS-045");
        record.attendance = Some(vec![AttendanceRecord {
            course_name: "Data Structures".to_string(),
            conducted: "30".to_string(),
            attended: "27".to_string(),
            percentage: "90.0".to_string(),
        }]);
        let json = serde_json::to_string(&record).unwrap();
        let loaded: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.roll_no, "21-CS-045");
        assert_eq!(loaded.attendance.unwrap()[0].attended, "27");
    }
}
