//! Document kind resolution from weak signals.
//!
//! Two entry points exist on purpose: uploads carry a MIME type and go
//! through [`classify_upload`], while blobs discovered by the session
//! scan only have a name and go through [`classify_blob_name`]. The two
//! map `.txt` differently (`Text` vs `Email`); that split is inherited
//! behavior and is kept as two distinct functions rather than unified.

use std::path::Path;

use crate::models::DocumentKind;

const WORD_MIME_MARKERS: [&str; 4] = [
    "word",
    "wordprocessing",
    "msword",
    "openxmlformats-officedocument.wordprocessingml",
];

const IMAGE_MIME_MARKERS: [&str; 7] = ["image/", "jpeg", "jpg", "png", "gif", "bmp", "tiff"];

/// Resolve a kind from an upload's MIME type and filename.
///
/// First match wins; MIME comparisons are case-insensitive. Never
/// fails: anything unrecognized resolves to `Other`.
pub fn classify_upload(mime_type: Option<&str>, file_name: Option<&str>) -> DocumentKind {
    let mime = mime_type.unwrap_or("").to_lowercase();

    if mime == "email" || file_name.is_some_and(|n| n.starts_with("Email_")) {
        return DocumentKind::Email;
    }
    if mime.contains("pdf") {
        return DocumentKind::Pdf;
    }
    if WORD_MIME_MARKERS.iter().any(|m| mime.contains(m)) {
        return DocumentKind::Word;
    }
    if IMAGE_MIME_MARKERS.iter().any(|m| mime.contains(m)) {
        return DocumentKind::Image;
    }
    if mime.starts_with("text/") || mime == "application/txt" {
        return DocumentKind::Text;
    }
    if mime.is_empty() || mime == "application/octet-stream" {
        if let Some(name) = file_name {
            return match extension_of(name).as_deref() {
                Some("pdf") => DocumentKind::Pdf,
                Some("doc") | Some("docx") => DocumentKind::Word,
                Some("txt") => DocumentKind::Text,
                Some("jpg") | Some("jpeg") | Some("png") | Some("gif") | Some("jfif") => {
                    DocumentKind::Image
                }
                Some("eml") => DocumentKind::Email,
                _ => DocumentKind::Other,
            };
        }
    }
    DocumentKind::Other
}

/// Resolve a kind from a blob name alone, extension only.
///
/// Same table as the upload fallback except `.txt` maps to `Email`:
/// the blob scan treats stored plain-text bodies as synthesized emails.
pub fn classify_blob_name(blob_name: &str) -> DocumentKind {
    match extension_of(blob_name).as_deref() {
        Some("pdf") => DocumentKind::Pdf,
        Some("doc") | Some("docx") => DocumentKind::Word,
        Some("txt") => DocumentKind::Email,
        Some("jpg") | Some("jpeg") | Some("png") | Some("gif") | Some("jfif") => {
            DocumentKind::Image
        }
        Some("eml") => DocumentKind::Email,
        _ => DocumentKind::Other,
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
