//! Local filesystem storage implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::storage::{RecordStorage, SnapshotMetadata};
use crate::utils::sanitize_storage_key;

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Storage key for a roll number; empty keys are rejected.
    fn storage_key(roll_no: &str) -> Result<String> {
        let key = sanitize_storage_key(roll_no);
        if key.is_empty() {
            return Err(AppError::validation(format!(
                "roll number {roll_no:?} sanitizes to an empty storage key"
            )));
        }
        Ok(key)
    }

    fn snapshot_path(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &PathBuf, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStorage for LocalStorage {
    async fn write_record(&self, record: &Record) -> Result<SnapshotMetadata> {
        let key = Self::storage_key(&record.roll_no)?;
        let path = self.snapshot_path(&key);
        let bytes = serde_json::to_vec_pretty(record)?;
        self.write_bytes(&path, &bytes).await?;
        log::info!("record written to {}", path.display());
        Ok(SnapshotMetadata {
            key,
            timestamp: Utc::now(),
        })
    }

    async fn load_record(&self, roll_no: &str) -> Result<Option<Record>> {
        let key = Self::storage_key(roll_no)?;
        let path = self.snapshot_path(&key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
