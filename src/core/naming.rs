//! Artifact naming.
//!
//! Audio files and transcription jobs are named after a whole-second
//! timestamp. Two names produced within the same second are identical.

use time::OffsetDateTime;

use crate::config::PipelineConfig;
use crate::core::tts::AudioFormat;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in local time, falling back to UTC when the local offset
/// cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// Generates audio file names and transcription job names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNamer {
    pub audio_prefix: String,
    pub audio_suffix: String,
    pub job_prefix: String,
    pub format: AudioFormat,
}

impl Default for ArtifactNamer {
    fn default() -> Self {
        Self {
            audio_prefix: "audioFile".to_string(),
            audio_suffix: "output".to_string(),
            job_prefix: "transcription-job".to_string(),
            format: AudioFormat::Mp3,
        }
    }
}

impl From<&PipelineConfig> for ArtifactNamer {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            audio_prefix: config.audio_name_prefix.clone(),
            audio_suffix: config.audio_name_suffix.clone(),
            job_prefix: config.job_name_prefix.clone(),
            format: config.audio_format,
        }
    }
}

impl ArtifactNamer {
    /// `YYYYMMDDHHMMSS` in the instant's own offset.
    pub fn timestamp(now: OffsetDateTime) -> String {
        format!(
            "{:04}{:02}{:02}{:02}{:02}{:02}",
            now.year(),
            u8::from(now.month()),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        )
    }

    /// `<audio_prefix>-<timestamp>-<audio_suffix>.<ext>`
    pub fn audio_name(&self, now: OffsetDateTime) -> String {
        format!(
            "{}-{}-{}.{}",
            self.audio_prefix,
            Self::timestamp(now),
            self.audio_suffix,
            self.format.extension()
        )
    }

    /// `<job_prefix>-<timestamp>`
    pub fn job_name(&self, now: OffsetDateTime) -> String {
        format!("{}-{}", self.job_prefix, Self::timestamp(now))
    }
}
