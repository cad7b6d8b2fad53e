//! Per-page extractors.
//!
//! Each extractor navigates the shared session to one portal page, waits for
//! a page-specific readiness signal, and returns a typed fragment. Failures
//! are reported as `Result` errors and recovered by the orchestrator, so one
//! broken page never aborts its siblings. The parsing logic is factored into
//! pure functions, tested here without a browser.

pub mod attendance;
pub mod courses;
pub mod dashboard;
pub mod invoices;
pub mod results;
pub mod timetable;
