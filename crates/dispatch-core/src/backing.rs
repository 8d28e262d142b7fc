//! Persistence adapter: the boundary between the store and durable storage.
//!
//! One JSON document per calendar month holds the full record collection:
//!
//! ```json
//! {
//!   "records": [
//!     { "id": 3, "incident": "INC042", "agent": "Agent 1",
//!       "logged_at": "2024-05-15 10:12:33" }
//!   ]
//! }
//! ```
//!
//! The `id` attribute is optional on read (legacy documents predate it) and
//! always written. Saves go through write-temp-then-rename so an interrupted
//! write never clobbers the last good document.

use crate::error::StoreError;
use crate::model::{Record, timestamp_text};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One record entry as it appears on disk. Unlike [`Record`], the id may be
/// absent; the store back-fills it at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub incident: String,
    pub agent: String,
    #[serde(with = "timestamp_text")]
    pub logged_at: NaiveDateTime,
}

impl From<&Record> for RawRecord {
    fn from(record: &Record) -> Self {
        Self {
            id: Some(record.id),
            incident: record.incident.clone(),
            agent: record.agent.clone(),
            logged_at: record.logged_at,
        }
    }
}

/// The container document: an ordered sequence of record entries.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    records: Vec<RawRecord>,
}

/// Seam between [`crate::store::Store`] and durable storage.
///
/// The store treats a save as its transaction unit: load full collection,
/// mutate in memory, write the full collection back.
pub trait Backing {
    /// Read the full entry sequence from the backing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptStore`] when the document cannot be read
    /// or parsed as a sequence of record entries.
    fn load(&self) -> Result<Vec<RawRecord>, StoreError>;

    /// Write the full collection, replacing the previous document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the write fails; the
    /// previously saved document must remain readable in that case.
    fn save(&mut self, records: &[Record]) -> Result<(), StoreError>;
}

/// File-backed [`Backing`] over a month-scoped JSON document.
#[derive(Debug, Clone)]
pub struct FileBacking {
    path: PathBuf,
}

impl FileBacking {
    /// Backing over an explicit document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing over the month-keyed document for `now` inside `dir`.
    ///
    /// Documents are named `dispatch_YYYY-MM.json`; re-resolving at every
    /// store open is what rolls the log over at month boundaries.
    #[must_use]
    pub fn for_month(dir: &Path, now: NaiveDateTime) -> Self {
        Self::new(dir.join(format!("dispatch_{}.json", now.format("%Y-%m"))))
    }

    /// The document path this backing reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: impl Into<String>) -> StoreError {
        StoreError::CorruptStore {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn persistence(&self, reason: impl Into<String>) -> StoreError {
        StoreError::Persistence {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl Backing for FileBacking {
    fn load(&self) -> Result<Vec<RawRecord>, StoreError> {
        if !self.path.exists() {
            // First open of a month starts an empty collection.
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)
            .map_err(|err| self.corrupt(format!("read failed: {err}")))?;
        let document: Document = serde_json::from_slice(&bytes)
            .map_err(|err| self.corrupt(err.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            records = document.records.len(),
            "loaded backing document"
        );
        Ok(document.records)
    }

    fn save(&mut self, records: &[Record]) -> Result<(), StoreError> {
        let document = Document {
            records: records.iter().map(RawRecord::from).collect(),
        };
        let body = serde_json::to_vec_pretty(&document)
            .map_err(|err| self.persistence(format!("serialize failed: {err}")))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| self.persistence(format!("create dir failed: {err}")))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, body)
            .map_err(|err| self.persistence(format!("write failed: {err}")))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|err| self.persistence(format!("rename failed: {err}")))?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "saved backing document"
        );
        Ok(())
    }
}
