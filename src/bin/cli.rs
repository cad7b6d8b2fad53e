//! ERP Scraper CLI
//!
//! Local execution entry point. Expects a geckodriver reachable at the
//! configured WebDriver endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use erp_scraper::{
    config,
    error::{AppError, Result},
    models::{Credentials, Record},
    pipeline,
    storage::{LocalStorage, RecordStorage},
};

/// ERP portal scraper
#[derive(Parser, Debug)]
#[command(
    name = "erp-scraper",
    version,
    about = "Scrapes student academic records from the Superior ERP portal"
)]
struct Cli {
    /// Path to storage directory containing config and snapshots
    #[arg(short, long, default_value = "data")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and scrape a fresh snapshot of the portal
    Scrape {
        /// Roll number (defaults to the ERP_ROLL_NO environment variable)
        #[arg(long)]
        roll_no: Option<String>,

        /// Portal password (defaults to the ERP_PASSWORD environment variable)
        #[arg(long)]
        password: Option<String>,

        /// Re-scrape even if a stored snapshot exists
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration files
    Validate,

    /// Show a summary of a stored snapshot
    Show {
        /// Roll number of the stored snapshot
        roll_no: String,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// A credential from its flag, falling back to an environment variable.
fn credential(flag: Option<String>, var: &str) -> Result<String> {
    flag.or_else(|| std::env::var(var).ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::validation(format!("missing credential: pass a flag or set {var}"))
        })
}

fn print_summary(record: &Record) {
    if let Some(reason) = &record.error {
        println!("scrape failed: {reason}");
        return;
    }
    println!("roll_no: {}", record.roll_no);
    if let Some(profile) = &record.profile {
        println!("student: {} (CGPA {})", profile.student_name, profile.cgpa);
    }
    if let Some(attendance) = &record.attendance {
        println!("attendance: {} courses", attendance.len());
    }
    if let Some(results) = &record.semester_results {
        println!("results: {} semesters", results.len());
    }
    if let Some(financials) = &record.financials {
        println!(
            "remaining balance: {}",
            financials.total_remaining_balance
        );
    }
    if let Some(timetable) = &record.timetable {
        println!("timetable: {} days", timetable.day_count());
    }
    if let Some(courses) = &record.enrolled_courses {
        println!("enrolled courses: {}", courses.len());
    }
    println!("sections populated: {}/6", record.section_count());
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("ERP scraper starting...");

    let config = config::load(&cli.storage_dir)?;
    let config = Arc::new(config);
    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Scrape {
            roll_no,
            password,
            force,
        } => {
            let credentials = Credentials::new(
                credential(roll_no, "ERP_ROLL_NO")?,
                credential(password, "ERP_PASSWORD")?,
            );
            let record = pipeline::run_scrape(config, &credentials, &storage, force).await?;
            print_summary(&record);
            if record.has_error() {
                std::process::exit(1);
            }
        }

        Command::Validate => {
            log::info!(
                "configuration OK ({} locators registered)",
                config.locators.len()
            );
        }

        Command::Show { roll_no } => match storage.load_record(&roll_no).await? {
            Some(record) => print_summary(&record),
            None => log::warn!("no stored snapshot for {roll_no}"),
        },
    }

    Ok(())
}
