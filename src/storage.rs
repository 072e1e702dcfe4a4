/// File storage for uploaded post images
///
/// Post creation delegates image persistence to a [`FileStorage`]
/// collaborator. The default implementation writes to a local directory
/// served under a public URL prefix; swapping in an object store only
/// requires another implementation of the trait.
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::StorageConfig;

/// Storage collaborator used by the post service.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist raw file bytes, returning the public URL of the stored file.
    async fn save(&self, bytes: &[u8], original_name: &str) -> io::Result<String>;

    /// Remove a previously stored file by its public URL.
    /// Unknown URLs are a no-op.
    async fn delete(&self, url: &str) -> io::Result<()>;
}

/// Local-disk implementation serving files under a URL prefix.
pub struct LocalFileStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn from_config(cfg: &StorageConfig) -> Self {
        Self::new(&cfg.upload_dir, &cfg.public_prefix)
    }

    /// Map a public URL back to the on-disk path, rejecting anything
    /// outside the upload directory.
    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.public_prefix)?.trim_start_matches('/');
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return None;
        }
        Some(self.root.join(name))
    }
}

/// Keep the original extension so the file is served with a sensible
/// content type; the name itself is always a fresh UUID.
fn storage_name(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()) && e.len() <= 8);

    match ext {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
        None => Uuid::new_v4().to_string(),
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, bytes: &[u8], original_name: &str) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = storage_name(original_name);
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes).await?;

        Ok(format!("{}/{}", self.public_prefix.trim_end_matches('/'), name))
    }

    async fn delete(&self, url: &str) -> io::Result<()> {
        let Some(path) = self.path_for_url(url) else {
            tracing::debug!(%url, "ignoring delete for unknown storage url");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_then_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/uploads");

        let url = storage.save(b"fake image bytes", "photo.png").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.strip_prefix("/uploads/").unwrap();
        assert!(dir.path().join(name).exists());

        storage.delete(&url).await.unwrap();
        assert!(!dir.path().join(name).exists());
    }

    #[tokio::test]
    async fn delete_of_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/uploads");
        storage.delete("/uploads/nope.png").await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/uploads");
        // Traversal attempts resolve to no path and are ignored.
        storage.delete("/uploads/../etc/passwd").await.unwrap();
        storage.delete("/elsewhere/file.png").await.unwrap();
    }

    #[test]
    fn storage_name_keeps_safe_extension_only() {
        assert!(storage_name("cat.JPG").ends_with(".jpg"));
        assert!(!storage_name("weird.name.with/slash").contains('/'));
        let no_ext = storage_name("noextension");
        assert!(!no_ext.contains('.'));
    }
}
