use std::sync::Arc;
use std::time::Duration;

use leptess::LepTess;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{DocsiftError, Result};

enum OcrBackend {
    Local { tesseract: Arc<Mutex<LepTess>> },
    Unavailable { reason: String },
}

/// Tesseract-backed OCR with graceful degradation: if the engine cannot
/// be initialized, the provider stays constructible and every call
/// returns `OcrUnavailable` instead.
pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
}

fn create_tesseract(languages: &str) -> std::result::Result<LepTess, String> {
    LepTess::new(None, languages).map_err(|e| e.to_string())
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let backend = match create_tesseract(&config.languages) {
            Ok(lt) => {
                info!(languages = %config.languages, "Tesseract OCR initialized");
                OcrBackend::Local {
                    tesseract: Arc::new(Mutex::new(lt)),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Ok(Self {
            backend,
            config: config.clone(),
        })
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    pub async fn ocr(&self, image_bytes: &[u8]) -> Result<String> {
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);

        let result = tokio::time::timeout(timeout_duration, self.ocr_internal(image_bytes)).await;

        match result {
            Ok(inner_result) => inner_result,
            Err(_) => Err(DocsiftError::Ocr(format!(
                "OCR operation timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }

    async fn ocr_internal(&self, image_bytes: &[u8]) -> Result<String> {
        match &self.backend {
            OcrBackend::Local { tesseract } => {
                let bytes = image_bytes.to_vec();
                let tesseract = Arc::clone(tesseract);

                let text = tokio::task::spawn_blocking(move || {
                    let mut lt = tesseract.blocking_lock();
                    lt.set_image_from_mem(&bytes)
                        .map_err(|e| DocsiftError::Ocr(format!("Failed to set image: {e}")))?;
                    lt.get_utf8_text()
                        .map_err(|e| DocsiftError::Ocr(format!("Failed to extract text: {e}")))
                })
                .await
                .map_err(|e| DocsiftError::Ocr(format!("OCR task panicked: {e}")))??;

                Ok(text.trim().to_string())
            }
            OcrBackend::Unavailable { reason } => {
                Err(DocsiftError::OcrUnavailable(reason.clone()))
            }
        }
    }
}

impl Clone for OcrProvider {
    fn clone(&self) -> Self {
        match &self.backend {
            OcrBackend::Local { tesseract } => Self {
                backend: OcrBackend::Local {
                    tesseract: Arc::clone(tesseract),
                },
                config: self.config.clone(),
            },
            OcrBackend::Unavailable { reason } => Self {
                backend: OcrBackend::Unavailable {
                    reason: reason.clone(),
                },
                config: self.config.clone(),
            },
        }
    }
}
