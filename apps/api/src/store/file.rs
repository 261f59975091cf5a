//! One JSON envelope per save under a directory.
//!
//! File names are the hex SHA-256 of the save name: fixed length and safe for
//! any name that passes `normalize_name`. The real name lives in the envelope.
//! Writes go to a uniquely named temporary file first and are renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use uuid::Uuid;
use tracing::{debug, warn};

use crate::store::{normalize_name, SaveInfo, SessionStore, StoreError};

const EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    name: String,
    saved_at: DateTime<Utc>,
    payload: String,
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", file_stem(name)))
    }

    async fn read_envelope(path: &Path) -> Result<Option<Envelope>, StoreError> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn save(&self, name: &str, blob: &str) -> Result<SaveInfo, StoreError> {
        let name = normalize_name(name)?;
        let envelope = Envelope {
            name: name.to_string(),
            saved_at: Utc::now(),
            payload: blob.to_string(),
        };
        let path = self.path_for(name);
        write_atomic(&path, &serde_json::to_string_pretty(&envelope)?).await?;
        debug!("Saved '{}' to {}", name, path.display());

        Ok(SaveInfo {
            name: envelope.name,
            saved_at: envelope.saved_at,
        })
    }

    async fn load(&self, name: &str) -> Result<Option<String>, StoreError> {
        let name = normalize_name(name)?;
        Ok(Self::read_envelope(&self.path_for(name))
            .await?
            .map(|envelope| envelope.payload))
    }

    async fn list(&self) -> Result<Vec<SaveInfo>, StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut entries = fs::read_dir(&self.dir).await.map_err(io_err)?;

        let mut saves = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            // One unreadable file should not hide every other save.
            match Self::read_envelope(&path).await {
                Ok(Some(envelope)) => saves.push(SaveInfo {
                    name: envelope.name,
                    saved_at: envelope.saved_at,
                }),
                Ok(None) => {}
                Err(e) => warn!("Skipping save file: {}", e),
            }
        }

        saves.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(saves)
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let name = normalize_name(name)?;
        let path = self.path_for(name);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// Writes `content` next to `path` and renames it over `path`. The temporary
/// file is removed if either step fails.
pub(crate) async fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension(format!("tmp-{}", Uuid::new_v4().simple()));

    if let Err(source) = fs::write(&tmp, content).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(StoreError::Io { path: tmp, source });
    }
    if let Err(source) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn file_stem(name: &str) -> String {
    hex::encode(Sha256::digest(name.as_bytes()))
}
