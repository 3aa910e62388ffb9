mod common;

use std::path::Path;

use docsift::config::OcrConfig;
use docsift::models::DocumentKind;
use docsift::ocr::OcrProvider;
use docsift::processing::extract_for_kind;
use docsift::processing::extractors::{PdfExtractor, WordExtractor};
use pretty_assertions::assert_eq;

fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn test_ocr() -> OcrProvider {
    OcrProvider::new(&OcrConfig {
        languages: "eng".to_string(),
        timeout_secs: 60,
    })
    .unwrap()
}

#[test]
fn pdf_pages_concatenate_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "two_pages.pdf",
        &common::pdf_with_pages(&["Alpha page", "Beta page"]),
    );

    let extraction = PdfExtractor::extract(&path);
    assert!(extraction.warning.is_none());

    let alpha = extraction.text.find("Alpha page").expect("first page text");
    let beta = extraction.text.find("Beta page").expect("second page text");
    assert!(alpha < beta, "page texts out of order: {}", extraction.text);
}

#[test]
fn pdf_with_one_unreadable_page_keeps_the_readable_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "partially_broken.pdf",
        &common::pdf_with_unreadable_page("Still readable"),
    );

    let extraction = PdfExtractor::extract(&path);
    assert!(
        extraction.text.contains("Still readable"),
        "readable page text missing: {:?}",
        extraction
    );
    assert!(
        extraction.warning.is_some(),
        "unreadable page should be surfaced as a warning"
    );
}

#[test]
fn pdf_extraction_result_is_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "single.pdf",
        &common::pdf_with_pages(&["Only page"]),
    );

    let extraction = PdfExtractor::extract(&path);
    assert_eq!(extraction.text, extraction.text.trim());
}

#[test]
fn word_paragraphs_join_without_separator() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "sample.docx",
        &common::docx_with_paragraphs(&["Hello ", "World"]),
    );

    let extraction = WordExtractor::extract(&path);
    assert_eq!(extraction.text, "Hello World");
    assert!(extraction.warning.is_none());
}

#[tokio::test]
async fn dispatch_routes_word_kind_to_word_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "dispatch.docx",
        &common::docx_with_paragraphs(&["routed"]),
    );

    let extraction = extract_for_kind(DocumentKind::Word, &path, &test_ocr()).await;
    assert_eq!(extraction.text, "routed");
}

#[tokio::test]
async fn other_kind_never_touches_the_file() {
    let extraction = extract_for_kind(
        DocumentKind::Other,
        Path::new("/nonexistent/whatever.bin"),
        &test_ocr(),
    )
    .await;
    assert_eq!(extraction.text, "");
    assert!(extraction.warning.is_none());
}

#[tokio::test]
async fn text_and_email_kinds_read_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "body.txt", b"Subject: hi\n\nplain body");

    for kind in [DocumentKind::Text, DocumentKind::Email] {
        let extraction = extract_for_kind(kind, &path, &test_ocr()).await;
        assert_eq!(extraction.text, "Subject: hi\n\nplain body");
    }
}
