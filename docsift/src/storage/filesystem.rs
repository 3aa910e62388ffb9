use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{DocsiftError, Result};

use super::{BlobObject, BlobStore};

/// Directory-backed blob store.
///
/// Objects live under `root/<session_id>/<name>`; locators are
/// `<public_base_url>/<session_id>/<name>`.
pub struct FilesystemStore {
    root: PathBuf,
    base_url: String,
}

impl FilesystemStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Round-trip write/read/delete under the root to catch filesystem
    /// problems (permissions, missing mounts) at startup instead of on
    /// the first upload.
    pub async fn validate(&self) -> Result<()> {
        let test_dir = self.root.join(".health-check");
        let test_file = test_dir.join("test.bin");

        fs::create_dir_all(&test_dir).await.map_err(|e| {
            DocsiftError::StorageUnreachable(format!("create_dir_all({test_dir:?}): {e}"))
        })?;

        let data = b"storage-health-check";
        fs::write(&test_file, data).await.map_err(|e| {
            DocsiftError::StorageUnreachable(format!("write({test_file:?}): {e}"))
        })?;

        let read_back = fs::read(&test_file).await.map_err(|e| {
            DocsiftError::StorageUnreachable(format!("read({test_file:?}): {e}"))
        })?;
        if read_back != data {
            return Err(DocsiftError::StorageUnreachable(
                "read-back mismatch".to_string(),
            ));
        }

        fs::remove_file(&test_file).await.map_err(|e| {
            DocsiftError::StorageUnreachable(format!("remove_file({test_file:?}): {e}"))
        })?;
        let _ = fs::remove_dir(&test_dir).await;

        Ok(())
    }

    fn locator_for(&self, rel: &str) -> String {
        format!("{}/{}", self.base_url, rel)
    }

    fn rel_from_locator<'a>(&self, locator: &'a str) -> &'a str {
        locator
            .strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(locator)
    }

    fn safe_path(&self, rel: &str) -> Result<PathBuf> {
        let rel_path = Path::new(rel);
        let traverses = rel_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if rel.is_empty() || traverses {
            return Err(DocsiftError::Validation(format!(
                "Invalid object path: {rel}"
            )));
        }
        Ok(self.root.join(rel_path))
    }
}

#[async_trait]
impl BlobStore for FilesystemStore {
    async fn list_objects(&self, session_id: &str) -> Result<Vec<BlobObject>> {
        if !fs::try_exists(&self.root).await.unwrap_or(false) {
            return Err(DocsiftError::StorageUnreachable(format!(
                "Storage root {} does not exist",
                self.root.display()
            )));
        }

        let session_dir = self.safe_path(session_id)?;
        let mut objects = Vec::new();

        let mut entries = match fs::read_dir(&session_dir).await {
            Ok(entries) => entries,
            // No objects were ever stored for this session.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(objects),
            Err(e) => {
                return Err(DocsiftError::Storage(format!(
                    "Failed to list {}: {e}",
                    session_dir.display()
                )))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocsiftError::Storage(format!("Failed to read listing entry: {e}")))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| DocsiftError::Storage(format!("Failed to stat entry: {e}")))?;
            if !file_type.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            let name = format!("{session_id}/{file_name}");
            let url = self.locator_for(&name);
            objects.push(BlobObject { name, url });
        }

        Ok(objects)
    }

    async fn download(&self, locator: &str) -> Result<Vec<u8>> {
        let rel = self.rel_from_locator(locator);
        let path = self.safe_path(rel)?;
        fs::read(&path)
            .await
            .map_err(|e| DocsiftError::Download(format!("{locator}: {e}")))
    }

    async fn upload(&self, data: &[u8], path: &str) -> Result<String> {
        let full_path = self.safe_path(path)?;
        debug!(path = %path, size = data.len(), "blob upload");

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                DocsiftError::StorageUnreachable(format!(
                    "Failed to create {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(&full_path, data)
            .await
            .map_err(|e| DocsiftError::Storage(format!("Failed to write {path}: {e}")))?;

        Ok(self.locator_for(path))
    }
}
