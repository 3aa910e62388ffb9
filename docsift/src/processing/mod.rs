mod classify;
pub mod extractors;
mod pipeline;

pub use classify::{classify_blob_name, classify_upload};
pub use extractors::{extract_for_kind, Extraction};
pub use pipeline::ExtractionPipeline;
