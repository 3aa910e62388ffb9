mod common;
mod document;

pub use common::{DocumentKind, DocumentStatus};
pub use document::{
    format_entity_list, DocumentOutcome, DocumentRecord, EmailIngestRequest, Entity,
    OutcomeStatus, SessionReport,
};
