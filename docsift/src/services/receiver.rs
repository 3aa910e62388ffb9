use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::db::DocumentStore;
use crate::error::Result;
use crate::models::{DocumentOutcome, DocumentRecord, DocumentStatus, OutcomeStatus, SessionReport};
use crate::processing::classify_blob_name;
use crate::storage::{BlobObject, BlobStore};

/// Scans a session's stored blobs and registers a document record for
/// each one not seen before. Re-running the scan is idempotent: known
/// documents come back as `exists` entries, never duplicates.
pub struct ReceiverService {
    db: Arc<dyn DocumentStore>,
    storage: Arc<dyn BlobStore>,
}

impl ReceiverService {
    pub fn new(db: Arc<dyn DocumentStore>, storage: Arc<dyn BlobStore>) -> Self {
        Self { db, storage }
    }

    /// Register all blobs stored under a session.
    ///
    /// A failing listing aborts the whole call; a failure on any single
    /// blob becomes an `error` entry and the scan continues.
    pub async fn ingest_session(&self, session_id: &str) -> Result<SessionReport> {
        info!(session_id, "Scanning stored blobs for session");
        let objects = self.storage.list_objects(session_id).await?;

        let mut results = Vec::with_capacity(objects.len());
        for object in objects {
            match self.ingest_object(session_id, &object).await {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    error!(blob = %object.name, error = %e, "Failed to ingest blob");
                    results.push(DocumentOutcome {
                        id: None,
                        name: object.name.clone(),
                        kind: None,
                        status: OutcomeStatus::Error,
                        url: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(SessionReport {
            message: format!(
                "Processed {} documents for session {session_id}",
                results.len()
            ),
            results,
        })
    }

    async fn ingest_object(
        &self,
        session_id: &str,
        object: &BlobObject,
    ) -> Result<DocumentOutcome> {
        let file_name = object
            .name
            .rsplit('/')
            .next()
            .unwrap_or(&object.name)
            .to_string();
        let kind = classify_blob_name(&file_name);

        if let Some(existing) = self.db.find_existing(session_id, &file_name, kind).await? {
            info!(name = %file_name, "Document already exists");
            return Ok(DocumentOutcome {
                id: Some(existing.id),
                name: existing.name,
                kind: existing.kind,
                status: OutcomeStatus::Exists,
                url: existing.source_url,
                error: None,
            });
        }

        let mut record = DocumentRecord::new(
            Uuid::new_v4().to_string(),
            session_id.to_string(),
            file_name.clone(),
        );
        record.kind = Some(kind);
        record.status = DocumentStatus::Received;
        record.source_url = Some(object.url.clone());

        self.db.create_document(&record).await?;
        info!(name = %file_name, kind = %kind, "Document registered");

        Ok(DocumentOutcome {
            id: Some(record.id),
            name: file_name,
            kind: Some(kind),
            status: OutcomeStatus::Success,
            url: Some(object.url.clone()),
            error: None,
        })
    }
}
