//! Amazon Polly TTS provider implementation.
//!
//! Implements [`SpeechSynthesizer`] with Polly's SynthesizeSpeech API via the
//! AWS SDK for Rust. The SDK response body is handed back as a forward-only
//! chunk stream; nothing is buffered here.

use std::sync::atomic::{AtomicU64, Ordering};

use async_stream::stream;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, OutputFormat, VoiceId};
use tracing::{debug, error};

use super::config::{AwsPollyTTSConfig, MAX_TEXT_LENGTH, PollyEngine};
use crate::core::tts::base::{AudioFormat, AudioStream, SpeechSynthesizer};
use crate::errors::{PipelineError, PipelineResult};

/// Convert PollyEngine to AWS SDK Engine type
fn engine_to_sdk(engine: PollyEngine) -> Engine {
    match engine {
        PollyEngine::Standard => Engine::Standard,
        PollyEngine::Neural => Engine::Neural,
        PollyEngine::LongForm => Engine::LongForm,
        PollyEngine::Generative => Engine::Generative,
    }
}

/// Convert AudioFormat to AWS SDK OutputFormat type
fn output_format_to_sdk(format: AudioFormat) -> OutputFormat {
    match format {
        AudioFormat::Mp3 => OutputFormat::Mp3,
        AudioFormat::OggVorbis => OutputFormat::OggVorbis,
        AudioFormat::Pcm => OutputFormat::Pcm,
    }
}

/// Amazon Polly speech synthesizer.
pub struct AwsPollyTTS {
    client: PollyClient,
    config: AwsPollyTTSConfig,
    /// Request counter for logging
    request_counter: AtomicU64,
}

impl AwsPollyTTS {
    /// Build a Polly client from a shared SDK configuration.
    pub fn new(sdk_config: &SdkConfig, config: AwsPollyTTSConfig) -> Self {
        Self::from_client(PollyClient::new(sdk_config), config)
    }

    /// Wrap an existing Polly client.
    pub fn from_client(client: PollyClient, config: AwsPollyTTSConfig) -> Self {
        Self {
            client,
            config,
            request_counter: AtomicU64::new(0),
        }
    }

    /// Get the Polly configuration
    pub fn polly_config(&self) -> &AwsPollyTTSConfig {
        &self.config
    }
}

#[async_trait]
impl SpeechSynthesizer for AwsPollyTTS {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        format: AudioFormat,
    ) -> PipelineResult<AudioStream> {
        let text_chars = text.chars().count();
        if text_chars > MAX_TEXT_LENGTH {
            return Err(PipelineError::Synthesis(format!(
                "Text length {} exceeds maximum {} characters",
                text_chars, MAX_TEXT_LENGTH
            )));
        }

        self.config
            .validate_for(format)
            .map_err(PipelineError::Synthesis)?;

        let request_id = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;

        debug!(
            request_id = request_id,
            text_len = text.len(),
            voice = voice,
            format = %format,
            "Synthesizing text with Amazon Polly"
        );

        let mut request = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice))
            .output_format(output_format_to_sdk(format));

        if let Some(engine) = self.config.engine {
            request = request.engine(engine_to_sdk(engine));
        }

        if let Some(sample_rate) = self.config.sample_rate {
            request = request.sample_rate(sample_rate.to_string());
        }

        let response = request.send().await.map_err(|e| {
            error!(request_id = request_id, error = %DisplayErrorContext(&e), "Polly API error");
            PipelineError::Synthesis(format!("Polly API error: {}", DisplayErrorContext(&e)))
        })?;

        let mut audio = response.audio_stream;
        let stream = stream! {
            while let Some(chunk) = audio.next().await {
                yield chunk.map_err(|e| {
                    PipelineError::Synthesis(format!("Failed to read audio stream: {}", e))
                });
            }
        };

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "aws-polly"
    }
}
