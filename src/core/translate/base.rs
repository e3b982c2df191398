use async_trait::async_trait;
use serde::Serialize;

use crate::errors::PipelineResult;

/// Result of translating one record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedRecord {
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Machine translation capability.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single line of text. Returns exactly one string per call.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> PipelineResult<String>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str {
        "translate"
    }
}
