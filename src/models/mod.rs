// src/models/mod.rs

//! Domain models for the scraper application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod locator;
mod record;

// Re-export all public types
pub use config::{BrowserConfig, Config, Credentials, PortalConfig, PortalPage};
pub use locator::{Locator, LocatorKind, LocatorRegistry};
pub use record::{
    AttendanceRecord, CourseResult, CourseStatus, DaySchedule, EnrolledCourse, Financials,
    NOT_FOUND, Profile, Record, SemesterResult, Timetable, TimetableEvent,
};
