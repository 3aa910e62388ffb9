//! Document ingestion handlers: multipart file batches and synthesized
//! email bodies, both scoped by a caller-supplied session id. Every
//! batch call returns one outcome entry per item; a single bad item
//! never fails the rest of the batch.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

use crate::api::AppState;
use crate::error::{DocsiftError, Result};
use crate::models::{
    DocumentOutcome, DocumentRecord, DocumentStatus, EmailIngestRequest, OutcomeStatus,
    SessionReport,
};
use crate::processing::classify_upload;

/// `POST /api/v1/sessions/{session_id}/documents`
///
/// Accepts a multipart batch of files. Each part is uploaded to blob
/// storage (overwriting any previous content at the same path),
/// classified from its MIME type and filename, and registered as a
/// `Queued` record. If the same session+name+kind was already
/// registered, the item comes back as an `exists` entry instead.
pub async fn upload_documents(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<SessionReport>> {
    let mut results = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DocsiftError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                error!(name = %file_name, error = %e, "Failed to read upload part");
                results.push(error_outcome(&file_name, e.to_string()));
                continue;
            }
        };

        match register_upload(
            &state,
            &session_id,
            &file_name,
            content_type.as_deref(),
            &data,
        )
        .await
        {
            Ok(outcome) => results.push(outcome),
            Err(e) => {
                error!(name = %file_name, error = %e, "Failed to ingest upload");
                results.push(error_outcome(&file_name, e.to_string()));
            }
        }
    }

    Ok(Json(SessionReport {
        message: format!(
            "Processed {} documents for session {session_id}",
            results.len()
        ),
        results,
    }))
}

/// `POST /api/v1/sessions/{session_id}/emails`
///
/// Synthesizes an email payload into a plain-text blob named
/// `Email_<uuid>.txt` and registers it like any other upload.
pub async fn ingest_email(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<EmailIngestRequest>,
) -> Result<Json<DocumentOutcome>> {
    req.validate()
        .map_err(|e| DocsiftError::Validation(e.to_string()))?;

    let file_name = format!("Email_{}.txt", Uuid::new_v4());
    let body = req.to_document_text();

    let outcome = register_upload(
        &state,
        &session_id,
        &file_name,
        Some("email"),
        body.as_bytes(),
    )
    .await?;

    Ok(Json(outcome))
}

/// `GET /api/v1/sessions/{session_id}/documents`
pub async fn list_documents(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<DocumentRecord>>> {
    let docs = state.db.find_documents(&session_id).await?;
    Ok(Json(docs))
}

async fn register_upload(
    state: &AppState,
    session_id: &str,
    file_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<DocumentOutcome> {
    let kind = classify_upload(content_type, Some(file_name));

    if let Some(existing) = state.db.find_existing(session_id, file_name, kind).await? {
        return Ok(DocumentOutcome {
            id: Some(existing.id),
            name: existing.name,
            kind: existing.kind,
            status: OutcomeStatus::Exists,
            url: existing.source_url,
            error: None,
        });
    }

    let url = state
        .storage
        .upload(data, &format!("{session_id}/{file_name}"))
        .await?;

    let mut record = DocumentRecord::new(
        Uuid::new_v4().to_string(),
        session_id.to_string(),
        file_name.to_string(),
    );
    record.kind = Some(kind);
    record.status = DocumentStatus::Queued;
    record.source_url = Some(url.clone());

    state.db.create_document(&record).await?;

    Ok(DocumentOutcome {
        id: Some(record.id),
        name: file_name.to_string(),
        kind: Some(kind),
        status: OutcomeStatus::Success,
        url: Some(url),
        error: None,
    })
}

fn error_outcome(name: &str, error: String) -> DocumentOutcome {
    DocumentOutcome {
        id: None,
        name: name.to_string(),
        kind: None,
        status: OutcomeStatus::Error,
        url: None,
        error: Some(error),
    }
}
