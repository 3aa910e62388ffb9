use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{DocumentKind, DocumentStatus};

/// The unit of work: one ingested document within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub session_id: String,
    pub name: String,
    /// `None` means the record was never classified.
    pub kind: Option<DocumentKind>,
    pub status: DocumentStatus,
    /// Opaque locator into the blob store, set at ingestion.
    pub source_url: Option<String>,
    /// `Some("")` is a valid "no text found" result, distinct from
    /// `None` ("extraction never attempted").
    pub extracted_text: Option<String>,
    /// Serialized entity pairs, one `Name: Value` per line. Written
    /// together with `extracted_text`.
    pub entity_list: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(id: String, session_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            session_id,
            name,
            kind: None,
            status: DocumentStatus::default(),
            source_url: None,
            extracted_text: None,
            entity_list: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A single named entity recognized in refined text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub value: String,
}

/// Serialize entities one per line as `Name: Value`, in order.
pub fn format_entity_list(entities: &[Entity]) -> String {
    entities
        .iter()
        .map(|e| format!("{}: {}", e.name, e.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-document outcome entry in a session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocumentKind>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// A new record was created for this document.
    Success,
    /// The document was already known for this session; no-op.
    Exists,
    /// Extraction ran and the results were persisted.
    Processed,
    /// This document failed; the rest of the batch continued.
    Error,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Exists => write!(f, "exists"),
            Self::Processed => write!(f, "processed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of a whole-session operation: one entry per document attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub message: String,
    pub results: Vec<DocumentOutcome>,
}

/// Inbound payload for synthesized email ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailIngestRequest {
    #[validate(length(max = 500))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 1_000_000))]
    pub body: String,
    #[validate(length(max = 320))]
    pub sender: Option<String>,
}

impl EmailIngestRequest {
    /// Render the payload into the plain-text blob body stored for
    /// extraction. Header lines are only included when present.
    pub fn to_document_text(&self) -> String {
        let mut text = String::new();
        if let Some(sender) = &self.sender {
            text.push_str("From: ");
            text.push_str(sender);
            text.push('\n');
        }
        if let Some(subject) = &self.subject {
            text.push_str("Subject: ");
            text.push_str(subject);
            text.push('\n');
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&self.body);
        text
    }
}
