//! Key-value blob storage for saved projects and settings

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract key-value blob store
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read the blob stored under `key`
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Store `data` under `key`, replacing any previous blob
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Remove the blob under `key`
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// List keys starting with `prefix`
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Read a blob, treating a missing key as `None`
    async fn read_optional(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        if self.exists(key).await? {
            self.read(key).await.map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Local filesystem storage: one file per key below a root directory
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Safely resolve a key, preventing path traversal attacks
    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(key).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::PermissionDenied(format!(
                        "key escapes the storage root: {}",
                        key
                    )));
                }
            }
        }

        Ok(self.root.join(normalized))
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(key)?;
        tokio::fs::read(full_path)
            .await
            .map_err(|e| StorageError::NotFound(format!("{}: {}", key, e)))
    }

    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::BackendError(e.to_string()))?;
        }

        // Write next to the target and rename so readers never see half a blob
        let temp_path = full_path.with_extension("tmp");
        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        tokio::fs::remove_file(full_path)
            .await
            .map_err(|e| StorageError::NotFound(format!("{}: {}", key, e)))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut entries = Vec::new();
        let mut read_dir = match tokio::fs::read_dir(&self.root).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(StorageError::BackendError(e.to_string())),
        };

        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?
        {
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort();
        Ok(entries)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let full_path = self.full_path(key)?;
        tokio::fs::try_exists(full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::BackendError("memory storage lock poisoned".to_string())
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .map_err(poisoned)?
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data.write().map_err(poisoned)?.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.data
            .write()
            .map_err(poisoned)?
            .remove(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .data
            .read()
            .map_err(poisoned)?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.data.read().map_err(poisoned)?.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.write("projects", b"[]".to_vec()).await.unwrap();
        assert_eq!(storage.read("projects").await.unwrap(), b"[]");
        assert!(storage.exists("projects").await.unwrap());
        assert!(!storage.exists("missing").await.unwrap());
        assert_eq!(storage.read_optional("missing").await.unwrap(), None);
        assert_eq!(storage.list("pro").await.unwrap(), vec!["projects".to_string()]);

        storage.delete("projects").await.unwrap();
        assert!(!storage.exists("projects").await.unwrap());
        assert!(storage.delete("projects").await.is_err());
    }

    #[tokio::test]
    async fn test_local_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(storage.list("").await.unwrap().is_empty());
        storage.write("lmm-api-config", b"{}".to_vec()).await.unwrap();
        storage.write("lmm-saved-projects", b"[]".to_vec()).await.unwrap();
        assert_eq!(storage.read("lmm-api-config").await.unwrap(), b"{}");
        assert_eq!(
            storage.list("lmm-").await.unwrap(),
            vec!["lmm-api-config".to_string(), "lmm-saved-projects".to_string()]
        );

        storage.delete("lmm-api-config").await.unwrap();
        assert_eq!(storage.read_optional("lmm-api-config").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.write("../escape", b"x".to_vec()).await,
            Err(StorageError::PermissionDenied(_))
        ));
        assert!(storage.read("/etc/passwd").await.is_err());
    }
}
