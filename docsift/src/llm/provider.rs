use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::models::Entity;

/// Text refinement and named-entity extraction collaborator.
///
/// Both calls are synchronous text-to-text / text-to-entity
/// transformations from the pipeline's point of view. The actual model
/// invocation is not wired up yet: `refine` passes text through
/// unchanged and `extract_entities` returns fixed sample data, but the
/// provider already carries the configuration and availability
/// plumbing so a completion backend can slot in behind the same calls.
#[derive(Debug, Clone)]
pub struct RefinementProvider {
    config: Option<Arc<LlmConfig>>,
}

impl RefinementProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        Self {
            config: config.map(|c| Arc::new(c.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// Refine extracted text before entity recognition.
    pub async fn refine(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    /// Run named-entity recognition over refined text.
    // TODO: replace the canned response with a chat completion call once
    // the NER prompt and output schema are settled.
    pub async fn extract_entities(&self, _text: &str) -> Result<Vec<Entity>> {
        Ok(vec![
            Entity {
                name: "Person".to_string(),
                value: "John Doe".to_string(),
            },
            Entity {
                name: "Organization".to_string(),
                value: "Acme Inc.".to_string(),
            },
        ])
    }
}
