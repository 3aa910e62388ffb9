use std::path::Path;

use tracing::warn;

use super::Extraction;
use crate::ocr::OcrProvider;

pub struct ImageExtractor;

impl ImageExtractor {
    /// Run OCR over an image file.
    ///
    /// The bytes are decode-validated before they reach the OCR engine
    /// so undecodable uploads fail the same way as any other extraction
    /// problem: empty text plus a warning, never an error.
    pub async fn extract(path: &Path, ocr: &OcrProvider) -> Extraction {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let warning = format!("Failed to read image {}: {e}", path.display());
                warn!("{}", warning);
                return Extraction::warned(warning);
            }
        };

        if let Err(e) = image::load_from_memory(&bytes) {
            let warning = format!("Failed to decode image {}: {e}", path.display());
            warn!("{}", warning);
            return Extraction::warned(warning);
        }

        match ocr.ocr(&bytes).await {
            Ok(text) => Extraction::of(text),
            Err(e) => {
                let warning = format!("OCR failed for {}: {e}", path.display());
                warn!("{}", warning);
                Extraction::warned(warning)
            }
        }
    }
}
