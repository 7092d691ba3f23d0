// 🗄️ Document Store - one JSON array per file, read and rewritten wholesale
//
// Every operation loads or serializes the entire document. There is no
// locking between read_all() and write_all(): two writers racing on the
// same file lose updates (last writer wins).

use crate::error::{Result, StorageFailure, TrackerError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A record addressable by its string id
pub trait Record {
    fn id(&self) -> &str;
}

/// Linear scan by id, first match wins
pub fn position_by_id<R: Record>(records: &[R], id: &str) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}

/// Durable storage of one JSON-encoded sequence of records
#[derive(Debug, Clone)]
pub struct DocumentStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> DocumentStore<R>
where
    R: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocumentStore {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file (and parent directories) holding `[]` if it is missing
    pub fn ensure_ready(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e.into()))?;
            }
        }

        fs::write(&self.path, "[]").map_err(|e| self.write_error(e.into()))?;
        info!(path = %self.path.display(), "initialized empty document store");
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<R>> {
        self.ensure_ready()?;

        let content = fs::read_to_string(&self.path).map_err(|e| self.read_error(e.into()))?;
        let records: Vec<R> =
            serde_json::from_str(&content).map_err(|e| self.read_error(e.into()))?;

        debug!(path = %self.path.display(), count = records.len(), "read document");
        Ok(records)
    }

    /// Replace the whole document. The file is untouched if serialization fails.
    pub fn write_all(&self, records: &[R]) -> Result<()> {
        self.ensure_ready()?;

        let content =
            serde_json::to_string_pretty(records).map_err(|e| self.write_error(e.into()))?;
        fs::write(&self.path, content).map_err(|e| self.write_error(e.into()))?;

        debug!(path = %self.path.display(), count = records.len(), "wrote document");
        Ok(())
    }

    fn read_error(&self, source: StorageFailure) -> TrackerError {
        TrackerError::StorageRead {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: StorageFailure) -> TrackerError {
        TrackerError::StorageWrite {
            path: self.path.clone(),
            source,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
