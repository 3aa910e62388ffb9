use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{DocsiftError, Result};

use super::{BlobObject, BlobStore};

/// Map-backed blob store for tests and ephemeral runs. Listing order is
/// the lexicographic key order, stable across calls.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    objects: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locator_for(path: &str) -> String {
        format!("mem://{path}")
    }

    fn path_from_locator(locator: &str) -> &str {
        locator.strip_prefix("mem://").unwrap_or(locator)
    }
}

#[async_trait]
impl BlobStore for InMemoryStore {
    async fn list_objects(&self, session_id: &str) -> Result<Vec<BlobObject>> {
        let prefix = format!("{session_id}/");
        let objects = self.objects.read().await;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| BlobObject {
                name: key.clone(),
                url: Self::locator_for(key),
            })
            .collect())
    }

    async fn download(&self, locator: &str) -> Result<Vec<u8>> {
        let path = Self::path_from_locator(locator);
        let objects = self.objects.read().await;
        objects
            .get(path)
            .cloned()
            .ok_or_else(|| DocsiftError::Download(format!("{locator}: object not found")))
    }

    async fn upload(&self, data: &[u8], path: &str) -> Result<String> {
        let mut objects = self.objects.write().await;
        objects.insert(path.to_string(), data.to_vec());
        Ok(Self::locator_for(path))
    }
}
