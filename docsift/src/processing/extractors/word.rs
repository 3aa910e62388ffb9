use std::path::Path;

use tracing::warn;

use super::Extraction;

pub struct WordExtractor;

impl WordExtractor {
    /// Extract text from a Word document.
    ///
    /// Run text of all paragraphs is concatenated in document order with
    /// no separator inserted between paragraphs; paragraph boundaries
    /// are intentionally not preserved as newlines. Any parse failure
    /// yields empty text.
    pub fn extract(path: &Path) -> Extraction {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let warning = format!("Failed to read document {}: {e}", path.display());
                warn!("{}", warning);
                return Extraction::warned(warning);
            }
        };

        let docx = match docx_rs::read_docx(&bytes) {
            Ok(docx) => docx,
            Err(e) => {
                let warning = format!("Failed to parse document {}: {e}", path.display());
                warn!("{}", warning);
                return Extraction::warned(warning);
            }
        };

        let mut text = String::new();
        for child in &docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                Self::push_paragraph_text(paragraph, &mut text);
            }
        }

        Extraction::of(text)
    }

    fn push_paragraph_text(paragraph: &docx_rs::Paragraph, out: &mut String) {
        for para_child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = para_child {
                for run_child in &run.children {
                    if let docx_rs::RunChild::Text(text) = run_child {
                        out.push_str(&text.text);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_docx_yields_empty_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        let extraction = WordExtractor::extract(&path);
        assert!(extraction.text.is_empty());
        assert!(extraction.warning.is_some());
    }

    #[test]
    fn test_paragraphs_concatenate_without_separator() {
        use std::io::Cursor;

        let docx = docx_rs::Docx::new()
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("first paragraph")),
            )
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("second paragraph")),
            );

        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.docx");
        std::fs::write(&path, buffer.into_inner()).unwrap();

        let extraction = WordExtractor::extract(&path);
        assert_eq!(extraction.text, "first paragraphsecond paragraph");
        assert!(extraction.warning.is_none());
    }
}
