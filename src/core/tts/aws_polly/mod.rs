//! Amazon Polly TTS provider module.
//!
//! Speech synthesis through Amazon Polly's SynthesizeSpeech API. It supports:
//!
//! - Any Polly voice ID (standard and neural)
//! - Multiple engines (standard, neural, long-form, generative)
//! - Output formats: mp3, ogg_vorbis, pcm
//! - AWS credential management through the shared SDK configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use waav_pipeline::core::tts::{AudioFormat, SpeechSynthesizer};
//! use waav_pipeline::core::tts::aws_polly::{AwsPollyTTS, AwsPollyTTSConfig};
//!
//! let sdk_config = aws_config::load_from_env().await;
//! let tts = AwsPollyTTS::new(&sdk_config, AwsPollyTTSConfig::default());
//! let stream = tts.synthesize("Hello from Amazon Polly!", "Joanna", AudioFormat::Mp3).await?;
//! ```

mod config;
mod provider;


pub use config::{AwsPollyTTSConfig, MAX_TEXT_LENGTH, PollyEngine};
pub use provider::AwsPollyTTS;
