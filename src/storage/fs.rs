//! Filesystem-backed object storage, the default for local development.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::ObjectStorage;

/// Writes objects under a root directory and serves them from a static
/// public base URL (the deployment fronts the directory with a file
/// server or CDN).
pub struct FsStorage {
    root: PathBuf,
    public_base: String,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, key: &str) -> anyhow::Result<PathBuf> {
        // Keys are produced by `upload_key` and never contain `..`, but an
        // attacker-controlled key must not escape the root.
        if key.split('/').any(|part| part == ".." || part.is_empty()) {
            anyhow::bail!("invalid object key: {key}");
        }
        Ok(self.root.join(Path::new(key)))
    }
}

#[async_trait]
impl ObjectStorage for FsStorage {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;
        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.object_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_base(&self) -> &str {
        &self.public_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::key_for_public_url;

    #[tokio::test]
    async fn test_put_writes_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path(), "https://img.example/");

        let url = storage
            .put("uploads/1-logo.png", b"png-bytes".to_vec(), Some("image/png"))
            .await
            .unwrap();
        assert_eq!(url, "https://img.example/uploads/1-logo.png");

        let on_disk = std::fs::read(dir.path().join("uploads/1-logo.png")).unwrap();
        assert_eq!(on_disk, b"png-bytes");

        // The returned URL round-trips back to the key.
        assert_eq!(
            key_for_public_url(storage.public_base(), &url),
            Some("uploads/1-logo.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path(), "https://img.example");

        storage
            .put("uploads/2-x.jpg", vec![1, 2, 3], None)
            .await
            .unwrap();
        storage.delete("uploads/2-x.jpg").await.unwrap();
        assert!(!dir.path().join("uploads/2-x.jpg").exists());
        // Second delete of a missing object succeeds.
        storage.delete("uploads/2-x.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_traversal_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path(), "https://img.example");
        assert!(storage.put("../escape.txt", vec![0], None).await.is_err());
        assert!(storage.delete("a//b").await.is_err());
    }
}
