// Error taxonomy for the document stores and handlers
//
// NotFound / GroupNotFound / ItemNotFound -> id does not resolve
// Validation                              -> bad or missing field
// StorageRead / StorageWrite              -> filesystem or JSON failure

use std::path::PathBuf;
use thiserror::Error;

/// Underlying cause of a storage failure
#[derive(Error, Debug)]
pub enum StorageFailure {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Top-level record lookup failed
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Sub-item not found: {item_id} (group {group_id})")]
    ItemNotFound { group_id: String, item_id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Failed to read {}: {source}", path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: StorageFailure,
    },

    #[error("Failed to write {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: StorageFailure,
    },
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    /// True for the three id-resolution failures
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrackerError::NotFound { .. }
                | TrackerError::GroupNotFound(_)
                | TrackerError::ItemNotFound { .. }
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            TrackerError::StorageRead { .. } | TrackerError::StorageWrite { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
