use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::db::DocumentStore;
use crate::error::{DocsiftError, Result};
use crate::llm::RefinementProvider;
use crate::models::{
    format_entity_list, DocumentKind, DocumentOutcome, DocumentRecord, DocumentStatus,
    OutcomeStatus, SessionReport,
};
use crate::ocr::OcrProvider;
use crate::storage::BlobStore;

use super::classify_upload;
use super::extractors::extract_for_kind;

/// Orchestrates a session's extraction run: enumerate, download,
/// classify, extract, refine, persist, one document at a time.
///
/// A single document's failure marks that document `Failed` and the run
/// moves on; only a failing session enumeration aborts the whole call.
pub struct ExtractionPipeline {
    db: Arc<dyn DocumentStore>,
    storage: Arc<dyn BlobStore>,
    ocr: OcrProvider,
    llm: RefinementProvider,
}

impl ExtractionPipeline {
    pub fn new(
        db: Arc<dyn DocumentStore>,
        storage: Arc<dyn BlobStore>,
        ocr: OcrProvider,
        llm: RefinementProvider,
    ) -> Self {
        Self {
            db,
            storage,
            ocr,
            llm,
        }
    }

    /// Process every document recorded for a session.
    ///
    /// Documents run strictly sequentially in listing order; they share
    /// a staging directory that is removed on every exit path.
    /// Cancellation is honored only at document boundaries.
    pub async fn process_session(
        &self,
        session_id: &str,
        cancel: &CancellationToken,
    ) -> Result<SessionReport> {
        info!(session_id, "Processing documents for session");
        let docs = self.db.find_documents(session_id).await?;

        let staging = tempfile::tempdir().map_err(|e| {
            DocsiftError::Internal(format!("Failed to create staging directory: {e}"))
        })?;

        let mut results = Vec::with_capacity(docs.len());
        for doc in &docs {
            if cancel.is_cancelled() {
                warn!(session_id, "Cancellation requested, stopping at document boundary");
                break;
            }

            match self.process_document(staging.path(), doc).await {
                Ok(kind) => {
                    results.push(DocumentOutcome {
                        id: Some(doc.id.clone()),
                        name: doc.name.clone(),
                        kind: Some(kind),
                        status: OutcomeStatus::Processed,
                        url: doc.source_url.clone(),
                        error: None,
                    });
                }
                Err(e) => {
                    error!(doc_id = %doc.id, name = %doc.name, error = %e, "Document processing failed");
                    if let Err(update_err) = self
                        .db
                        .update_document_status(&doc.id, DocumentStatus::Failed)
                        .await
                    {
                        error!(doc_id = %doc.id, error = %update_err, "Failed to record failure status");
                    }
                    results.push(DocumentOutcome {
                        id: Some(doc.id.clone()),
                        name: doc.name.clone(),
                        kind: doc.kind,
                        status: OutcomeStatus::Error,
                        url: doc.source_url.clone(),
                        error: Some(e.to_string()),
                    });
                }
            }

            // Per-document staging release; the TempDir guard still
            // sweeps whatever is left when the run ends.
            let _ = tokio::fs::remove_file(staging.path().join(&doc.name)).await;
        }

        info!(session_id, count = results.len(), "Session processing finished");
        Ok(SessionReport {
            message: format!(
                "Processed {} documents for session {session_id}",
                results.len()
            ),
            results,
        })
    }

    async fn process_document(
        &self,
        staging: &Path,
        doc: &DocumentRecord,
    ) -> Result<DocumentKind> {
        info!(doc_id = %doc.id, name = %doc.name, "Processing document");

        let locator = doc.source_url.as_deref().ok_or_else(|| {
            DocsiftError::Download(format!("Document {} has no source location", doc.id))
        })?;
        let bytes = self.storage.download(locator).await?;

        let local_path = staging.join(&doc.name);
        tokio::fs::write(&local_path, &bytes)
            .await
            .map_err(|e| DocsiftError::Download(format!("Failed to stage {}: {e}", doc.name)))?;

        let kind = match doc.kind {
            Some(kind) => kind,
            None => {
                let kind = classify_upload(None, Some(&doc.name));
                self.db.update_document_kind(&doc.id, kind).await?;
                kind
            }
        };

        let extraction = extract_for_kind(kind, &local_path, &self.ocr).await;

        let (refined, entity_list) = if extraction.text.is_empty() {
            (String::new(), String::new())
        } else {
            let refined = self.llm.refine(&extraction.text).await?;
            let entities = self.llm.extract_entities(&refined).await?;
            let entity_list = format_entity_list(&entities);
            (refined, entity_list)
        };

        self.db
            .update_extraction(&doc.id, &refined, &entity_list, DocumentStatus::Processed)
            .await?;

        info!(doc_id = %doc.id, name = %doc.name, "Document processed successfully");
        Ok(kind)
    }
}
