//! Session Store: named saves of whole documents.
//!
//! The store treats documents as opaque serialized blobs keyed by a
//! user-chosen name. Names are unique; saving under an existing name replaces
//! the previous save.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file;
pub mod memory;
pub mod working_copy;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use working_copy::WorkingCopy;

pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid save name: {0}")]
    InvalidName(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save file {} is unreadable: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode save: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One listed save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveInfo {
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `blob` under `name`, replacing any existing save of that name.
    async fn save(&self, name: &str, blob: &str) -> Result<SaveInfo, StoreError>;

    async fn load(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// All saves, ordered by name.
    async fn list(&self) -> Result<Vec<SaveInfo>, StoreError>;

    /// Returns whether a save was removed.
    async fn delete(&self, name: &str) -> Result<bool, StoreError>;
}

/// Trims `name` and checks it is usable as a save key.
pub fn normalize_name(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidName("name is empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(StoreError::InvalidName(format!(
            "name is longer than {MAX_NAME_CHARS} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(StoreError::InvalidName(
            "name contains control characters".to_string(),
        ));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  My CV 1/2/2025 ").unwrap(), "My CV 1/2/2025");
        assert_eq!(normalize_name("سی وی").unwrap(), "سی وی");
        assert!(matches!(normalize_name("   "), Err(StoreError::InvalidName(_))));
        assert!(matches!(normalize_name("a\nb"), Err(StoreError::InvalidName(_))));
        assert!(normalize_name(&"x".repeat(MAX_NAME_CHARS)).is_ok());
        assert!(normalize_name(&"x".repeat(MAX_NAME_CHARS + 1)).is_err());
    }
}
