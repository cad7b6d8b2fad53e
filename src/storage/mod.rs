//! Storage abstractions for record persistence.
//!
//! One serialized snapshot per roll number:
//!
//! ```text
//! {root}/
//! ├── config.toml            # Scraper configuration
//! └── {sanitized_roll}.json  # Latest Record snapshot
//! ```
//!
//! Re-scraping replaces a snapshot atomically; there is no incremental
//! mutation.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Record;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a snapshot write.
#[derive(Debug, Clone)]
pub struct SnapshotMetadata {
    /// Sanitized storage key the snapshot was written under
    pub key: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for record storage backends.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Persist one record, replacing any previous snapshot for the roll
    /// number as a unit.
    async fn write_record(&self, record: &Record) -> Result<SnapshotMetadata>;

    /// Load the stored snapshot for a roll number, if any.
    async fn load_record(&self, roll_no: &str) -> Result<Option<Record>>;
}
