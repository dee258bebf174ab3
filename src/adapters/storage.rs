use crate::domain::model::ProfileRecord;
use crate::domain::ports::{ProfileStore, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_PROFILE_KEY: &str = "userProfile";

/// Files under a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        let full_path = self.base_path.join(path);
        match tokio::fs::remove_file(full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Profile kept as one flat JSON object under a fixed key.
#[derive(Debug, Clone)]
pub struct JsonProfileStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> JsonProfileStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    fn file_name(&self) -> String {
        format!("{}.json", self.key)
    }
}

#[async_trait]
impl<S: Storage> ProfileStore for JsonProfileStore<S> {
    async fn load(&self) -> Result<Option<ProfileRecord>> {
        let data = match self.storage.read_file(&self.file_name()).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    async fn save(&self, record: &ProfileRecord) -> Result<()> {
        let data = serde_json::to_vec(record)?;
        tracing::debug!("Writing {} bytes to {}", data.len(), self.file_name());
        self.storage.write_file(&self.file_name(), &data).await
    }
}

/// Process-local store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    record: Arc<Mutex<Option<ProfileRecord>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProfileRecord) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(record))),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self) -> Result<Option<ProfileRecord>> {
        Ok(self.record.lock().await.clone())
    }

    async fn save(&self, record: &ProfileRecord) -> Result<()> {
        *self.record.lock().await = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record() -> ProfileRecord {
        ProfileRecord {
            first_name: "Simone".to_string(),
            last_name: "de Beauvoir".to_string(),
            email: "simone@example.com".to_string(),
            birth_date: "1908-01-09".to_string(),
            address: "11bis rue Victor Schoelcher, Paris".to_string(),
            phone: "0612345678".to_string(),
            country_code: "+33".to_string(),
        }
    }

    #[tokio::test]
    async fn test_local_storage_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        storage.write_file("a/b.json", b"{}").await.unwrap();
        assert_eq!(storage.read_file("a/b.json").await.unwrap(), b"{}");

        storage.delete_file("a/b.json").await.unwrap();
        assert!(storage.read_file("a/b.json").await.unwrap_err().is_not_found());
        // deleting twice is fine
        storage.delete_file("a/b.json").await.unwrap();
    }

    #[tokio::test]
    async fn test_json_store_missing_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonProfileStore::new(LocalStorage::new(temp_dir.path()), DEFAULT_PROFILE_KEY);

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_store_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonProfileStore::new(LocalStorage::new(temp_dir.path()), DEFAULT_PROFILE_KEY);

        store.save(&sample_record()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(sample_record()));

        let raw = std::fs::read_to_string(temp_dir.path().join("userProfile.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["lastName"], "de Beauvoir");
        assert_eq!(json["countryCode"], "+33");
    }

    #[tokio::test]
    async fn test_json_store_rejects_corrupted_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("userProfile.json"), "{not json").unwrap();
        let store = JsonProfileStore::new(LocalStorage::new(temp_dir.path()), DEFAULT_PROFILE_KEY);

        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_store_is_shared_between_clones() {
        let store = InMemoryProfileStore::new();
        let other = store.clone();
        assert_eq!(other.load().await.unwrap(), None);

        store.save(&sample_record()).await.unwrap();
        assert_eq!(other.load().await.unwrap(), Some(sample_record()));
    }
}
