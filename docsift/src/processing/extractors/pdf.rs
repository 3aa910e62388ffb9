use std::path::Path;

use tracing::warn;

use super::Extraction;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from a PDF, one page at a time.
    ///
    /// Pages are attempted independently: a page that cannot be decoded
    /// contributes no text but does not stop the pages after it. Page
    /// texts are joined with newlines and the result is trimmed. A file
    /// that cannot be loaded at all yields empty text.
    pub fn extract(path: &Path) -> Extraction {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let warning = format!("Failed to read PDF {}: {e}", path.display());
                warn!("{}", warning);
                return Extraction::warned(warning);
            }
        };

        let doc = match lopdf::Document::load_mem(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                let warning = format!("Failed to load PDF {}: {e}", path.display());
                warn!("{}", warning);
                return Extraction::warned(warning);
            }
        };

        let mut text = String::new();
        let mut skipped_pages = 0u32;
        for (page_num, _) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(page_text) if !page_text.trim().is_empty() => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Ok(_) => {
                    warn!(page = page_num, "No text found on page");
                }
                Err(e) => {
                    skipped_pages += 1;
                    warn!(page = page_num, error = %e, "Skipping unreadable page");
                }
            }
        }

        Extraction {
            text: text.trim().to_string(),
            warning: (skipped_pages > 0)
                .then(|| format!("Skipped {skipped_pages} unreadable page(s)")),
        }
    }
}
