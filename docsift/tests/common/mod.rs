#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use docsift::config::DatabaseConfig;
use docsift::db::{Database, DocumentStore, LibSqlBackend};
use docsift::storage::InMemoryStore;

/// Fresh in-memory document store.
pub async fn memory_db() -> Arc<dyn DocumentStore> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        auth_token: None,
        local_path: None,
    };
    let db = Database::new(&config)
        .await
        .expect("Failed to open in-memory database");
    Arc::new(LibSqlBackend::new(db))
}

/// Fresh in-memory blob store.
pub fn memory_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

/// Build a minimal valid PDF with one page per entry in `page_texts`.
pub fn pdf_with_pages(page_texts: &[&str]) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in page_texts {
        let content = format!("BT /F1 12 Tf 50 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Object::Stream(Stream::new(
            dictionary! {},
            content.into_bytes(),
        )));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut pdf_bytes = Vec::new();
    doc.save_to(&mut pdf_bytes).expect("Failed to save PDF");
    pdf_bytes
}

/// Build a two-page PDF where the second page's content stream points
/// at an object that does not exist, so that page cannot be decoded.
pub fn pdf_with_unreadable_page(readable_text: &str) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let content = format!("BT /F1 12 Tf 50 700 Td ({readable_text}) Tj ET");
    let content_id = doc.add_object(Object::Stream(Stream::new(
        dictionary! {},
        content.into_bytes(),
    )));
    let good_page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => resources_id,
        "Contents" => content_id,
    });

    // Dangling reference: no object (9999, 0) is ever inserted.
    let bad_page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => resources_id,
        "Contents" => Object::Reference((9999, 0)),
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![good_page_id.into(), bad_page_id.into()],
            "Count" => 2,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut pdf_bytes = Vec::new();
    doc.save_to(&mut pdf_bytes).expect("Failed to save PDF");
    pdf_bytes
}

/// Build a DOCX with one paragraph per entry in `paragraphs`.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
        );
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}
