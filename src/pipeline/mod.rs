//! Pipeline entry points for scraper operations.
//!
//! - `scrape_all`: Run one full portal scrape, always yielding a Record
//! - `run_scrape`: Credential checks, snapshot reuse, persistence

pub mod scrape;

pub use scrape::{run_scrape, scrape_all};
