use chrono::{DateTime, Utc};
use libsql::{params, Connection, Row};

use crate::error::Result;
use crate::models::{DocumentKind, DocumentRecord, DocumentStatus};

const DOCUMENT_COLUMNS: &str = "id, session_id, name, kind, status, source_url, \
     extracted_text, entity_list, created_at, updated_at";

pub struct DocumentRepository;

impl DocumentRepository {
    pub async fn create(conn: &Connection, doc: &DocumentRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO documents (
                id, session_id, name, kind, status, source_url,
                extracted_text, entity_list, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                doc.id.clone(),
                doc.session_id.clone(),
                doc.name.clone(),
                doc.kind.map(|k| k.to_string()),
                doc.status.to_string(),
                doc.source_url.clone(),
                doc.extracted_text.clone(),
                doc.entity_list.clone(),
                doc.created_at.to_rfc3339(),
                doc.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<DocumentRecord>> {
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1");
        let mut rows = conn.query(&sql, params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_document(&row)?))
        } else {
            Ok(None)
        }
    }

    /// All records for a session, in creation order.
    pub async fn find_by_session(
        conn: &Connection,
        session_id: &str,
    ) -> Result<Vec<DocumentRecord>> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE session_id = ?1 ORDER BY created_at"
        );
        let mut rows = conn.query(&sql, params![session_id]).await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_document(&row)?);
        }
        Ok(results)
    }

    /// Lookup backing idempotent ingestion: a record matching the same
    /// session, name, and kind means the document was already received.
    pub async fn find_existing(
        conn: &Connection,
        session_id: &str,
        name: &str,
        kind: DocumentKind,
    ) -> Result<Option<DocumentRecord>> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE session_id = ?1 AND name = ?2 AND kind = ?3"
        );
        let mut rows = conn
            .query(&sql, params![session_id, name, kind.to_string()])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_document(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update_status(
        conn: &Connection,
        id: &str,
        status: DocumentStatus,
    ) -> Result<()> {
        conn.execute(
            "UPDATE documents SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.to_string(), Utc::now().to_rfc3339()],
        )
        .await?;

        Ok(())
    }

    pub async fn update_kind(conn: &Connection, id: &str, kind: DocumentKind) -> Result<()> {
        conn.execute(
            "UPDATE documents SET kind = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, kind.to_string(), Utc::now().to_rfc3339()],
        )
        .await?;

        Ok(())
    }

    /// Persist extraction output. Text, entities, and status land in a
    /// single statement so a reader never observes a partial result.
    pub async fn update_extraction(
        conn: &Connection,
        id: &str,
        extracted_text: &str,
        entity_list: &str,
        status: DocumentStatus,
    ) -> Result<()> {
        conn.execute(
            r#"
            UPDATE documents SET
                extracted_text = ?2,
                entity_list = ?3,
                status = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
            params![
                id,
                extracted_text,
                entity_list,
                status.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    fn row_to_document(row: &Row) -> Result<DocumentRecord> {
        let kind: Option<String> = row.get(3)?;
        let status: String = row.get(4)?;
        let created_at: String = row.get(8)?;
        let updated_at: String = row.get(9)?;

        Ok(DocumentRecord {
            id: row.get(0)?,
            session_id: row.get(1)?,
            name: row.get(2)?,
            kind: kind.and_then(|k| k.parse().ok()),
            status: status.parse().unwrap_or_default(),
            source_url: row.get(5)?,
            extracted_text: row.get(6)?,
            entity_list: row.get(7)?,
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        })
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
