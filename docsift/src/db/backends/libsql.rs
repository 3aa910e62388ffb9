use async_trait::async_trait;

use crate::db::repository::DocumentRepository;
use crate::db::traits::DocumentStore;
use crate::db::Database;
use crate::error::Result;
use crate::models::{DocumentKind, DocumentRecord, DocumentStatus};

/// [`DocumentStore`] over a libsql database (local file, `:memory:`,
/// or remote/replica).
pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for LibSqlBackend {
    async fn create_document(&self, doc: &DocumentRecord) -> Result<()> {
        let conn = self.db.connect()?;
        DocumentRepository::create(&conn, doc).await
    }

    async fn get_document_by_id(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let conn = self.db.connect()?;
        DocumentRepository::get_by_id(&conn, id).await
    }

    async fn find_documents(&self, session_id: &str) -> Result<Vec<DocumentRecord>> {
        let conn = self.db.connect()?;
        DocumentRepository::find_by_session(&conn, session_id).await
    }

    async fn find_existing(
        &self,
        session_id: &str,
        name: &str,
        kind: DocumentKind,
    ) -> Result<Option<DocumentRecord>> {
        let conn = self.db.connect()?;
        DocumentRepository::find_existing(&conn, session_id, name, kind).await
    }

    async fn update_document_status(&self, id: &str, status: DocumentStatus) -> Result<()> {
        let conn = self.db.connect()?;
        DocumentRepository::update_status(&conn, id, status).await
    }

    async fn update_document_kind(&self, id: &str, kind: DocumentKind) -> Result<()> {
        let conn = self.db.connect()?;
        DocumentRepository::update_kind(&conn, id, kind).await
    }

    async fn update_extraction(
        &self,
        id: &str,
        extracted_text: &str,
        entity_list: &str,
        status: DocumentStatus,
    ) -> Result<()> {
        let conn = self.db.connect()?;
        DocumentRepository::update_extraction(&conn, id, extracted_text, entity_list, status)
            .await
    }
}
