use axum::extract::{Path, State};
use axum::Json;

use crate::api::AppState;
use crate::error::Result;
use crate::models::SessionReport;

/// `POST /api/v1/sessions/{session_id}/ingest`
///
/// Scan the session's stored blobs and register records for any new
/// ones. Idempotent: repeating the call yields `exists` entries.
pub async fn ingest_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionReport>> {
    let report = state.receiver.ingest_session(&session_id).await?;
    Ok(Json(report))
}

/// `POST /api/v1/sessions/{session_id}/process`
///
/// Run the extraction pipeline over every document recorded for the
/// session. Returns one entry per document; per-document failures are
/// reported inline and do not fail the call.
pub async fn process_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionReport>> {
    let cancel = state.cancel.child_token();
    let report = state.pipeline.process_session(&session_id, &cancel).await?;
    Ok(Json(report))
}
