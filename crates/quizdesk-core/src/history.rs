//! File-backed score history.
//!
//! Every write rewrites the whole file. There is no locking: a single
//! process owns the history file.

use std::path::{Path, PathBuf};

use crate::error::{LoadError, QuizError, Result};
use crate::model::HistoryRecord;

/// Number of records the admin view shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Append-only sequence of completed sessions, persisted as a JSON array.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Open the store, reading any existing records. A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = read_records(&path)?;
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the records from disk.
    pub fn load(&mut self) -> Result<&[HistoryRecord]> {
        self.records = read_records(&self.path)?;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and persist the full sequence.
    ///
    /// The in-memory sequence is only extended once the write succeeds.
    pub fn append(&mut self, record: HistoryRecord) -> Result<()> {
        self.records.push(record);
        if let Err(e) = write_records(&self.path, &self.records) {
            self.records.pop();
            return Err(e);
        }
        tracing::info!(
            "history now holds {} records ({})",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Replace the persisted history with an empty sequence.
    pub fn clear(&mut self) -> Result<()> {
        write_records(&self.path, &[])?;
        let removed = std::mem::take(&mut self.records).len();
        tracing::warn!("cleared {removed} history records ({})", self.path.display());
        Ok(())
    }

    /// Wipe the history file at `path` without requiring it to parse.
    ///
    /// Returns how many records were removed, or `None` if the old file was
    /// unreadable or malformed.
    pub fn clear_path(path: &Path) -> Result<Option<usize>> {
        let removed = match read_records(path) {
            Ok(records) => Some(records.len()),
            Err(e) => {
                tracing::warn!("discarding unreadable history: {e}");
                None
            }
        };
        write_records(path, &[])?;
        tracing::warn!("cleared history at {}", path.display());
        Ok(removed)
    }

    /// Most recent records whose user contains `filter`, newest first.
    ///
    /// The filter is trimmed and matched case-insensitively; an empty filter
    /// matches every record. At most `limit` records are returned.
    pub fn recent(&self, filter: Option<&str>, limit: usize) -> Vec<&HistoryRecord> {
        let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
        let matching: Vec<&HistoryRecord> = self
            .records
            .iter()
            .filter(|r| needle.is_empty() || r.user.to_lowercase().contains(&needle))
            .collect();
        let skip = matching.len().saturating_sub(limit);
        matching.into_iter().skip(skip).rev().collect()
    }
}

fn read_records(path: &Path) -> Result<Vec<HistoryRecord>> {
    if !path.exists() {
        tracing::debug!("no history at {}, starting empty", path.display());
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = serde_json::from_str(&content).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(records)
}

fn write_records(path: &Path, records: &[HistoryRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| QuizError::Persist {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| QuizError::Persist {
        path: path.to_path_buf(),
        source,
    })
}
