//! Amazon Translate provider.
//!
//! Calls the TranslateText API through the AWS SDK for Rust. Every SDK failure
//! (auth, throttling, unsupported language pair, network) surfaces as
//! [`PipelineError::Translation`].

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_translate::Client as TranslateClient;
use aws_sdk_translate::error::DisplayErrorContext;
use tracing::{debug, error};

use super::base::Translator;
use crate::errors::{PipelineError, PipelineResult};

/// Maximum input size accepted by TranslateText (UTF-8 bytes).
pub const MAX_TRANSLATE_BYTES: usize = 10_000;

/// Amazon Translate client.
pub struct AwsTranslator {
    client: TranslateClient,
}

impl AwsTranslator {
    /// Build a Translate client from a shared SDK configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: TranslateClient::new(sdk_config),
        }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> PipelineResult<String> {
        if text.trim().is_empty() {
            return Err(PipelineError::Translation(
                "Text to translate must not be empty".to_string(),
            ));
        }
        if text.len() > MAX_TRANSLATE_BYTES {
            return Err(PipelineError::Translation(format!(
                "Text size {} bytes exceeds maximum {} bytes",
                text.len(),
                MAX_TRANSLATE_BYTES
            )));
        }

        debug!(
            text_len = text.len(),
            source_language, target_language, "Translating text with Amazon Translate"
        );

        let response = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(source_language)
            .target_language_code(target_language)
            .send()
            .await
            .map_err(|e| {
                error!(error = %DisplayErrorContext(&e), "Translate API error");
                PipelineError::Translation(format!(
                    "Translate API error: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(response.translated_text().to_string())
    }

    fn provider_name(&self) -> &'static str {
        "aws-translate"
    }
}
