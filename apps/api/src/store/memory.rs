use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::store::{normalize_name, SaveInfo, SessionStore, StoreError};

/// Process-local store. Stands in for `FileStore` when the saves directory
/// cannot be opened.
#[derive(Default)]
pub struct MemoryStore {
    saves: RwLock<BTreeMap<String, (SaveInfo, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn save(&self, name: &str, blob: &str) -> Result<SaveInfo, StoreError> {
        let name = normalize_name(name)?;
        let info = SaveInfo {
            name: name.to_string(),
            saved_at: Utc::now(),
        };
        self.saves
            .write()
            .await
            .insert(name.to_string(), (info.clone(), blob.to_string()));
        Ok(info)
    }

    async fn load(&self, name: &str) -> Result<Option<String>, StoreError> {
        let name = normalize_name(name)?;
        Ok(self.saves.read().await.get(name).map(|(_, blob)| blob.clone()))
    }

    async fn list(&self) -> Result<Vec<SaveInfo>, StoreError> {
        Ok(self
            .saves
            .read()
            .await
            .values()
            .map(|(info, _)| info.clone())
            .collect())
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let name = normalize_name(name)?;
        Ok(self.saves.write().await.remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_overwrites_and_lists_by_name() {
        let store = MemoryStore::new();
        store.save("b", "{\"v\":1}").await.unwrap();
        store.save("a", "{}").await.unwrap();
        store.save(" b ", "{\"v\":2}").await.unwrap();

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(store.load("b").await.unwrap().as_deref(), Some("{\"v\":2}"));
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let store = MemoryStore::new();
        store.save("cv", "{}").await.unwrap();

        assert!(store.delete("cv").await.unwrap());
        assert!(!store.delete("cv").await.unwrap());
        assert_eq!(store.load("cv").await.unwrap(), None);
        assert!(store.save("", "{}").await.is_err());
    }
}
