// src/pipeline/scrape.rs

//! Scrape orchestration.
//!
//! One orchestrator run owns one browser session. The six extractors run
//! strictly in a fixed order over that session and their fragments merge
//! into a single [`Record`]; a failed extractor costs its own section only.
//! The session is closed on every exit path.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Config, Credentials, Record};
use crate::services::extractors::{attendance, courses, dashboard, invoices, results, timetable};
use crate::services::Session;
use crate::storage::RecordStorage;

/// Scrape, reusing a stored snapshot when one exists.
///
/// Credentials are checked for non-emptiness only. A Record carrying `error`
/// is returned to the caller but never persisted.
pub async fn run_scrape(
    config: Arc<Config>,
    credentials: &Credentials,
    storage: &dyn RecordStorage,
    force: bool,
) -> Result<Record> {
    credentials.validate()?;

    if !force {
        if let Some(cached) = storage.load_record(&credentials.roll_no).await? {
            log::info!(
                "using stored snapshot for {}; re-scrape with --force",
                credentials.roll_no
            );
            return Ok(cached);
        }
    }

    let record = scrape_all(config, credentials).await;

    if let Some(reason) = &record.error {
        log::error!("scrape failed, nothing persisted: {reason}");
        return Ok(record);
    }

    let summary = storage.write_record(&record).await?;
    log::info!(
        "snapshot for {} saved under key {} at {}",
        record.roll_no,
        summary.key,
        summary.timestamp
    );
    log::info!("sections populated: {}/6", record.section_count());
    Ok(record)
}

/// Run one full scrape: login, six extractors in order, merge, close.
///
/// Never panics and never returns an error: login failure or an orchestration
/// defect degrade the Record to `{error}`.
pub async fn scrape_all(config: Arc<Config>, credentials: &Credentials) -> Record {
    let mut session = match Session::open(config).await {
        Ok(session) => session,
        Err(err) => return Record::failed(format!("failed to launch browser session: {err}")),
    };

    if let Err(err) = session.login(credentials).await {
        if let Err(shot_err) = session.capture_failure("login").await {
            log::warn!("could not capture login failure screenshot: {shot_err}");
        }
        session.close().await;
        return Record::failed(err.to_string());
    }

    let mut record = Record::new(credentials.roll_no.clone());
    if let Err(err) = run_extractors(&session, &mut record).await {
        log::error!("scrape aborted: {err}");
        if let Err(shot_err) = session.capture_failure("critical").await {
            log::warn!("could not capture failure screenshot: {shot_err}");
        }
        session.close().await;
        return Record::failed(err.to_string());
    }

    session.close().await;
    record
}

/// Fixed extractor order; the dashboard goes first so the profile (and the
/// student name consumers key on) survives later page breakage.
async fn run_extractors(session: &Session, record: &mut Record) -> Result<()> {
    merge(
        &mut record.profile,
        "dashboard",
        dashboard::extract(session).await,
    )?;
    merge(
        &mut record.attendance,
        "attendance",
        attendance::extract(session).await,
    )?;
    merge(
        &mut record.semester_results,
        "results",
        results::extract(session).await,
    )?;
    merge(
        &mut record.financials,
        "invoices",
        invoices::extract(session).await,
    )?;
    merge(
        &mut record.timetable,
        "timetable",
        timetable::extract(session).await,
    )?;
    merge(
        &mut record.enrolled_courses,
        "enrolled courses",
        courses::extract(session).await,
    )?;
    Ok(())
}

/// Merge one extractor's outcome into its Record slot.
///
/// A locator miss is a code defect and aborts the run; every other failure
/// is downgraded to a logged, absent section.
fn merge<T>(slot: &mut Option<T>, page: &str, outcome: Result<T>) -> Result<()> {
    match outcome {
        Ok(fragment) => {
            *slot = Some(fragment);
            Ok(())
        }
        Err(err @ AppError::Locator(_)) => Err(err),
        Err(err) => {
            let err = AppError::extraction(page, err);
            log::warn!("{err}; section skipped");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_populates_slot_on_success() {
        let mut slot: Option<u32> = None;
        assert!(merge(&mut slot, "dashboard", Ok(7)).is_ok());
        assert_eq!(slot, Some(7));
    }

    #[test]
    fn merge_downgrades_extraction_failures() {
        let mut slot: Option<u32> = None;
        let outcome: Result<u32> = Err(AppError::extraction("results", "row vanished"));
        assert!(merge(&mut slot, "results", outcome).is_ok());
        assert!(slot.is_none());
    }

    #[test]
    fn merge_propagates_locator_defects() {
        let mut slot: Option<u32> = None;
        let outcome: Result<u32> = Err(AppError::Locator("results.nope".to_string()));
        match merge(&mut slot, "results", outcome) {
            Err(AppError::Locator(path)) => assert_eq!(path, "results.nope"),
            other => panic!("expected Locator error, got {other:?}"),
        }
        assert!(slot.is_none());
    }

    #[test]
    fn record_with_every_section_failed_keeps_roll_no_only() {
        // What scrape_all produces when login succeeds but every page breaks.
        let mut record = Record::new("21-CS-045");
        for page in [
            "dashboard",
            "attendance",
            "results",
            "invoices",
            "timetable",
            "enrolled courses",
        ] {
            let outcome: Result<u32> = Err(AppError::extraction(page, "timed out"));
            let mut slot = None;
            merge(&mut slot, page, outcome).unwrap();
            assert!(slot.is_none());
        }
        record.error = None;
        assert_eq!(record.section_count(), 0);
        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["roll_no"]);
    }
}
