use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::db::DocumentStore;
use crate::llm::RefinementProvider;
use crate::ocr::OcrProvider;
use crate::processing::ExtractionPipeline;
use crate::services::ReceiverService;
use crate::storage::BlobStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn BlobStore>,
    pub receiver: Arc<ReceiverService>,
    pub pipeline: Arc<ExtractionPipeline>,
    /// Root token for the process; child tokens gate long session runs
    /// so shutdown stops them at document boundaries.
    pub cancel: CancellationToken,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<dyn DocumentStore>,
        storage: Arc<dyn BlobStore>,
        ocr: OcrProvider,
        llm: RefinementProvider,
        cancel: CancellationToken,
    ) -> Self {
        let receiver = Arc::new(ReceiverService::new(db.clone(), storage.clone()));
        let pipeline = Arc::new(ExtractionPipeline::new(
            db.clone(),
            storage.clone(),
            ocr,
            llm,
        ));

        Self {
            config: Arc::new(config),
            db,
            storage,
            receiver,
            pipeline,
            cancel,
        }
    }
}
