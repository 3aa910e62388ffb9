use std::path::Path;

use tracing::warn;

use super::Extraction;

pub struct TextExtractor;

impl TextExtractor {
    /// Read file contents verbatim. Serves both plain-text documents
    /// and synthesized email bodies; no transformation is applied.
    pub async fn extract(path: &Path) -> Extraction {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Extraction::of(text),
            Err(e) => {
                let warning = format!("Failed to read text file {}: {e}", path.display());
                warn!("{}", warning);
                Extraction::warned(warning)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_contents_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let extraction = TextExtractor::extract(&path).await;
        assert_eq!(extraction.text, "line one\nline two\n");
        assert!(extraction.warning.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_with_warning() {
        let extraction = TextExtractor::extract(Path::new("/nonexistent/note.txt")).await;
        assert!(extraction.text.is_empty());
        assert!(extraction.warning.is_some());
    }
}
