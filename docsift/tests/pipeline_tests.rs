mod common;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use docsift::config::OcrConfig;
use docsift::error::{DocsiftError, Result};
use docsift::llm::RefinementProvider;
use docsift::models::{DocumentKind, DocumentRecord, DocumentStatus, OutcomeStatus};
use docsift::ocr::OcrProvider;
use docsift::processing::ExtractionPipeline;
use docsift::services::ReceiverService;
use docsift::storage::{BlobObject, BlobStore, InMemoryStore};
use tokio_util::sync::CancellationToken;

fn test_ocr() -> OcrProvider {
    OcrProvider::new(&OcrConfig {
        languages: "eng".to_string(),
        timeout_secs: 60,
    })
    .unwrap()
}

fn pipeline(
    db: Arc<dyn docsift::db::DocumentStore>,
    storage: Arc<dyn BlobStore>,
) -> ExtractionPipeline {
    ExtractionPipeline::new(db, storage, test_ocr(), RefinementProvider::new(None))
}

/// Wraps a store and fails downloads whose locator contains any of the
/// configured markers.
struct FailingDownloads {
    inner: Arc<InMemoryStore>,
    failing: HashSet<String>,
}

#[async_trait]
impl BlobStore for FailingDownloads {
    async fn list_objects(&self, session_id: &str) -> Result<Vec<BlobObject>> {
        self.inner.list_objects(session_id).await
    }

    async fn download(&self, locator: &str) -> Result<Vec<u8>> {
        if self.failing.iter().any(|marker| locator.contains(marker)) {
            return Err(DocsiftError::Download(format!(
                "{locator}: injected failure"
            )));
        }
        self.inner.download(locator).await
    }

    async fn upload(&self, data: &[u8], path: &str) -> Result<String> {
        self.inner.upload(data, path).await
    }
}

#[tokio::test]
async fn text_document_flows_end_to_end() {
    let db = common::memory_db().await;
    let storage = common::memory_store();
    storage.upload(b"hello world", "sess-1/notes.txt").await.unwrap();

    ReceiverService::new(db.clone(), storage.clone())
        .ingest_session("sess-1")
        .await
        .unwrap();

    let report = pipeline(db.clone(), storage)
        .process_session("sess-1", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].status, OutcomeStatus::Processed);

    let docs = db.find_documents("sess-1").await.unwrap();
    let doc = &docs[0];
    assert_eq!(doc.status, DocumentStatus::Processed);
    assert_eq!(doc.extracted_text.as_deref(), Some("hello world"));
    assert_eq!(
        doc.entity_list.as_deref(),
        Some("Person: John Doe\nOrganization: Acme Inc.")
    );
}

#[tokio::test]
async fn unsupported_kind_still_persists_processed_with_empty_results() {
    let db = common::memory_db().await;
    let storage = common::memory_store();
    storage.upload(b"\x00\x01", "sess-1/mystery.xyz").await.unwrap();

    ReceiverService::new(db.clone(), storage.clone())
        .ingest_session("sess-1")
        .await
        .unwrap();

    let report = pipeline(db.clone(), storage)
        .process_session("sess-1", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].status, OutcomeStatus::Processed);
    assert_eq!(report.results[0].kind, Some(DocumentKind::Other));

    let doc = &db.find_documents("sess-1").await.unwrap()[0];
    assert_eq!(doc.status, DocumentStatus::Processed);
    assert_eq!(doc.extracted_text.as_deref(), Some(""));
    assert_eq!(doc.entity_list.as_deref(), Some(""));
}

#[tokio::test]
async fn one_failed_download_does_not_abort_the_batch() {
    let db = common::memory_db().await;
    let inner = common::memory_store();
    inner.upload(b"one", "sess-1/a.txt").await.unwrap();
    inner.upload(b"two", "sess-1/b.txt").await.unwrap();
    inner.upload(b"three", "sess-1/c.txt").await.unwrap();

    ReceiverService::new(db.clone(), inner.clone())
        .ingest_session("sess-1")
        .await
        .unwrap();

    let storage: Arc<dyn BlobStore> = Arc::new(FailingDownloads {
        inner,
        failing: HashSet::from(["b.txt".to_string()]),
    });

    let report = pipeline(db.clone(), storage)
        .process_session("sess-1", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.results.len(), 3);

    let errors: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.status == OutcomeStatus::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "b.txt");
    assert!(errors[0].error.as_deref().unwrap().contains("injected failure"));

    let docs = db.find_documents("sess-1").await.unwrap();
    let failed = docs.iter().find(|d| d.name == "b.txt").unwrap();
    assert_eq!(failed.status, DocumentStatus::Failed);
    // The failed record never got extraction output.
    assert!(failed.extracted_text.is_none());

    for name in ["a.txt", "c.txt"] {
        let doc = docs.iter().find(|d| d.name == name).unwrap();
        assert_eq!(doc.status, DocumentStatus::Processed);
    }
}

#[tokio::test]
async fn cancellation_is_honored_at_document_boundaries() {
    let db = common::memory_db().await;
    let storage = common::memory_store();
    storage.upload(b"x", "sess-1/a.txt").await.unwrap();

    ReceiverService::new(db.clone(), storage.clone())
        .ingest_session("sess-1")
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = pipeline(db.clone(), storage)
        .process_session("sess-1", &cancel)
        .await
        .unwrap();

    assert!(report.results.is_empty());
    // Nothing was mutated.
    let doc = &db.find_documents("sess-1").await.unwrap()[0];
    assert_eq!(doc.status, DocumentStatus::Received);
}

#[tokio::test]
async fn unclassified_records_are_classified_during_processing() {
    let db = common::memory_db().await;
    let storage = common::memory_store();
    let url = storage.upload(b"plain body", "sess-1/plain.txt").await.unwrap();

    let mut record = DocumentRecord::new(
        "doc-unclassified".to_string(),
        "sess-1".to_string(),
        "plain.txt".to_string(),
    );
    record.source_url = Some(url);
    db.create_document(&record).await.unwrap();

    let report = pipeline(db.clone(), storage)
        .process_session("sess-1", &CancellationToken::new())
        .await
        .unwrap();

    // The upload-table fallback maps .txt to text, not email.
    assert_eq!(report.results[0].kind, Some(DocumentKind::Text));
    assert_eq!(report.results[0].status, OutcomeStatus::Processed);

    let doc = db.get_document_by_id("doc-unclassified").await.unwrap().unwrap();
    assert_eq!(doc.extracted_text.as_deref(), Some("plain body"));
    // The classification sticks to the record.
    assert_eq!(doc.kind, Some(DocumentKind::Text));
}

#[tokio::test]
async fn session_report_counts_every_document_attempted() {
    let db = common::memory_db().await;
    let storage = common::memory_store();
    for name in ["a.txt", "b.txt", "c.txt", "d.txt"] {
        storage
            .upload(b"content", &format!("sess-1/{name}"))
            .await
            .unwrap();
    }

    ReceiverService::new(db.clone(), storage.clone())
        .ingest_session("sess-1")
        .await
        .unwrap();

    let report = pipeline(db.clone(), storage)
        .process_session("sess-1", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.results.len(), 4);
    assert!(report.message.contains("4 documents"));
}
