use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::core::naming::ArtifactNamer;
use crate::core::storage::{AudioArtifact, ObjectLocation};
use crate::core::stt::TranscriptionJob;
use crate::core::translate::TranslatedRecord;
use crate::core::tts::AudioFormat;

/// Progress of one record through the pipeline.
///
/// Stages only move forward. A failure leaves the record at the last stage it
/// completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStage {
    Start,
    Translated,
    Synthesized,
    Uploaded,
    Submitted,
    Done,
}

impl RecordStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Translated => "translated",
            Self::Synthesized => "synthesized",
            Self::Uploaded => "uploaded",
            Self::Submitted => "submitted",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RecordStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the orchestrator needs from the configuration.
///
/// Holds no credentials, so it can be cloned and logged freely.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub source_language: String,
    pub target_language: String,
    pub voice_id: String,
    pub audio_format: AudioFormat,
    pub transcription_language: String,
    pub bucket: String,
    pub key_prefix: Option<String>,
    pub media_uri_scheme: String,
    pub results_object_key: Option<String>,
    pub output_path: PathBuf,
    pub staging_dir: PathBuf,
    pub namer: ArtifactNamer,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for RunSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            voice_id: config.voice_id.clone(),
            audio_format: config.audio_format,
            transcription_language: config.transcription_language.clone(),
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
            media_uri_scheme: config.media_uri_scheme.clone(),
            results_object_key: config.results_object_key.clone(),
            output_path: config.output_path.clone(),
            staging_dir: config.staging_dir.clone(),
            namer: ArtifactNamer::from(config),
        }
    }
}

/// A record that made it through every stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    /// 0-based line number in the input
    pub index: usize,
    pub translation: TranslatedRecord,
    pub artifact: AudioArtifact,
    pub job: TranscriptionJob,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRun {
    /// Local output file; already deleted when the run returns
    pub output_path: PathBuf,
    pub records: Vec<RecordOutcome>,
    pub skipped_blank_lines: usize,
    /// Where the translated text was uploaded, when enabled
    pub results_location: Option<ObjectLocation>,
}

impl PipelineRun {
    pub fn processed(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(RecordStage::Start < RecordStage::Translated);
        assert!(RecordStage::Translated < RecordStage::Synthesized);
        assert!(RecordStage::Synthesized < RecordStage::Uploaded);
        assert!(RecordStage::Uploaded < RecordStage::Submitted);
        assert!(RecordStage::Submitted < RecordStage::Done);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(RecordStage::Synthesized.to_string(), "synthesized");
        assert_eq!(
            serde_json::to_string(&RecordStage::Uploaded).unwrap(),
            "\"uploaded\""
        );
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = PipelineConfig::default();
        config.bucket = "media".to_string();
        config.key_prefix = Some("runs".to_string());
        config.audio_format = AudioFormat::OggVorbis;

        let settings = RunSettings::from(&config);

        assert_eq!(settings.bucket, "media");
        assert_eq!(settings.key_prefix.as_deref(), Some("runs"));
        assert_eq!(settings.namer.format, AudioFormat::OggVorbis);
        assert_eq!(settings.source_language, "ja");
        assert_eq!(settings.transcription_language, "en-US");
    }
}
