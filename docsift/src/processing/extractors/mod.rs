//! Kind-specific text-extraction strategies.
//!
//! Every strategy converts a local file path into an [`Extraction`] and
//! never returns an error: internal failures surface as empty text plus
//! a warning, so one bad document can never abort a batch. Dispatch is
//! purely by kind; there is no fallback cascade between strategies.

use std::path::Path;

use crate::models::DocumentKind;
use crate::ocr::OcrProvider;

pub mod image;
pub mod pdf;
pub mod text;
pub mod word;

pub use image::ImageExtractor;
pub use pdf::PdfExtractor;
pub use text::TextExtractor;
pub use word::WordExtractor;

/// Outcome of one extraction attempt. "No text extracted" is a
/// first-class result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub warning: Option<String>,
}

impl Extraction {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            warning: None,
        }
    }

    pub fn of(text: String) -> Self {
        Self {
            text,
            warning: None,
        }
    }

    pub fn warned(warning: String) -> Self {
        Self {
            text: String::new(),
            warning: Some(warning),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Select and run the strategy for `kind`. `Other` yields empty text
/// without touching the file.
pub async fn extract_for_kind(
    kind: DocumentKind,
    path: &Path,
    ocr: &OcrProvider,
) -> Extraction {
    match kind {
        DocumentKind::Pdf => PdfExtractor::extract(path),
        DocumentKind::Word => WordExtractor::extract(path),
        DocumentKind::Image => ImageExtractor::extract(path, ocr).await,
        DocumentKind::Text | DocumentKind::Email => TextExtractor::extract(path).await,
        DocumentKind::Other => Extraction::empty(),
    }
}
