use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::errors::PipelineResult;

/// Forward-only stream of encoded audio chunks returned by a synthesis call.
///
/// The stream can be read exactly once; anything that needs the bytes twice
/// has to materialize it first (see [`crate::core::staging::StagedAudio`]).
pub type AudioStream = BoxStream<'static, PipelineResult<Bytes>>;

/// Encoded audio formats a synthesizer can produce.
///
/// - **Mp3**: Compressed audio (default)
/// - **OggVorbis**: Open-source compression, good quality/size ratio
/// - **Pcm**: Raw 16-bit signed little-endian samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioFormat {
    #[default]
    #[serde(rename = "mp3")]
    Mp3,
    #[serde(rename = "ogg_vorbis")]
    OggVorbis,
    #[serde(rename = "pcm")]
    Pcm,
}

impl AudioFormat {
    /// API string understood by Amazon Polly.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg_vorbis",
            Self::Pcm => "pcm",
        }
    }

    /// MIME type of the encoded audio.
    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::OggVorbis => "audio/ogg",
            Self::Pcm => "audio/pcm",
        }
    }

    /// File extension used for generated audio names.
    #[inline]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg",
            Self::Pcm => "pcm",
        }
    }

    /// Sample rates Polly accepts for this format.
    pub fn supported_sample_rates(&self) -> &'static [u32] {
        match self {
            Self::Mp3 | Self::OggVorbis => &[8000, 16000, 22050, 24000],
            Self::Pcm => &[8000, 16000],
        }
    }

    /// Media format Amazon Transcribe expects for this audio, if it accepts it at all.
    ///
    /// Headerless PCM cannot be submitted as a batch transcription job.
    pub fn transcription_media_format(&self) -> Option<&'static str> {
        match self {
            Self::Mp3 => Some("mp3"),
            Self::OggVorbis => Some("ogg"),
            Self::Pcm => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" | "mpeg" => Ok(Self::Mp3),
            "ogg_vorbis" | "ogg" | "vorbis" => Ok(Self::OggVorbis),
            "pcm" | "raw" => Ok(Self::Pcm),
            other => Err(format!(
                "Unsupported audio format: {other}. Supported formats: mp3, ogg_vorbis, pcm"
            )),
        }
    }
}

/// Text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the given voice, returning the encoded audio as a stream.
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        format: AudioFormat,
    ) -> PipelineResult<AudioStream>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str {
        "tts"
    }
}
