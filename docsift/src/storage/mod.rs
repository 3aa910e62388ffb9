//! Blob storage collaborator.
//!
//! The pipeline and receiver only ever see [`BlobStore`]; backends can
//! be swapped without touching them. Uploads have idempotent overwrite
//! semantics: re-uploading the same path replaces content. An
//! unreachable container surfaces as the dedicated
//! `StorageUnreachable` error, distinguishable from per-object
//! failures.

mod filesystem;
mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub use filesystem::FilesystemStore;
pub use memory::InMemoryStore;

/// One stored object as returned by a session listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobObject {
    /// Path within the container, `<session_id>/<file name>`.
    pub name: String,
    /// Opaque locator resolvable by [`BlobStore::download`].
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Enumerate objects stored under a session prefix. The intrinsic
    /// order is backend-defined; callers must treat it as arbitrary but
    /// stable for a given call.
    async fn list_objects(&self, session_id: &str) -> Result<Vec<BlobObject>>;

    /// Fetch an object's bytes by locator.
    async fn download(&self, locator: &str) -> Result<Vec<u8>>;

    /// Store bytes at `path` (relative to the container), replacing any
    /// existing content, and return the object's locator.
    async fn upload(&self, data: &[u8], path: &str) -> Result<String>;
}
