use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DocumentKind, DocumentRecord, DocumentStatus};

/// Persistence collaborator for document records.
///
/// The receiver, pipeline, and handlers depend on this trait rather
/// than a concrete database so tests can substitute fakes without
/// touching process-wide state. Each mutating call commits atomically
/// per record; a failure rolls back only that record's change.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(&self, doc: &DocumentRecord) -> Result<()>;
    async fn get_document_by_id(&self, id: &str) -> Result<Option<DocumentRecord>>;
    /// All records belonging to one ingestion session.
    async fn find_documents(&self, session_id: &str) -> Result<Vec<DocumentRecord>>;
    /// The idempotency probe: an existing record for the same
    /// session+name+kind means re-ingestion is a no-op.
    async fn find_existing(
        &self,
        session_id: &str,
        name: &str,
        kind: DocumentKind,
    ) -> Result<Option<DocumentRecord>>;
    async fn update_document_status(&self, id: &str, status: DocumentStatus) -> Result<()>;
    /// Record the kind assigned at classification time. Only ever
    /// called for records whose kind was still unset.
    async fn update_document_kind(&self, id: &str, kind: DocumentKind) -> Result<()>;
    /// Write `extracted_text`, `entity_list`, and the new status
    /// together, atomically from the caller's perspective.
    async fn update_extraction(
        &self,
        id: &str,
        extracted_text: &str,
        entity_list: &str,
        status: DocumentStatus,
    ) -> Result<()>;
}
