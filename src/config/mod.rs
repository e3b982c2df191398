//! Configuration module for the pipeline.
//!
//! Configuration is read from the environment (after `.env` has been loaded by
//! the binary), optionally overridden by a YAML file, and validated before use.
//! Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Applying YAML overrides on top of the environment
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use waav_pipeline::config::PipelineConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = PipelineConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config = PipelineConfig::from_file(&PathBuf::from("pipeline.yaml"))?;
//! println!("Uploading to {}", config.bucket);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::core::tts::AudioFormat;
use crate::core::tts::aws_polly::PollyEngine;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

pub const DEFAULT_AWS_REGION: &str = "ap-northeast-1";
pub const DEFAULT_MEDIA_URI_SCHEME: &str = "s3";
pub const DEFAULT_INPUT_PATH: &str = "./input.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "translated_text.txt";
pub const DEFAULT_SOURCE_LANGUAGE: &str = "ja";
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";
pub const DEFAULT_VOICE_ID: &str = "Joanna";
pub const DEFAULT_TRANSCRIPTION_LANGUAGE: &str = "en-US";
pub const DEFAULT_AUDIO_NAME_PREFIX: &str = "audioFile";
pub const DEFAULT_AUDIO_NAME_SUFFIX: &str = "output";
pub const DEFAULT_JOB_NAME_PREFIX: &str = "transcription-job";

/// Pipeline configuration
///
/// Contains everything one run needs:
/// - AWS connection settings (region, optional explicit credentials, endpoint override)
/// - Storage settings (bucket, key prefix, media URI scheme)
/// - Local file locations (input, output, staging directory)
/// - Translation, synthesis and transcription parameters
/// - Artifact naming prefixes
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    // AWS settings
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
    /// Endpoint override applied to every AWS client (LocalStack, tests)
    pub aws_endpoint_url: Option<String>,

    // Storage settings
    /// Bucket receiving audio and used as the transcription output bucket
    pub bucket: String,
    /// Optional key prefix for every uploaded object
    pub key_prefix: Option<String>,
    pub media_uri_scheme: String,
    /// When set, the translated-text file is uploaded under this key before deletion
    pub results_object_key: Option<String>,

    // Local files
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub staging_dir: PathBuf,

    // Translation
    pub source_language: String,
    pub target_language: String,

    // Synthesis
    pub voice_id: String,
    pub audio_format: AudioFormat,
    pub polly_engine: Option<PollyEngine>,
    pub sample_rate: Option<u32>,

    // Transcription
    pub transcription_language: String,

    // Naming
    pub audio_name_prefix: String,
    pub audio_name_suffix: String,
    pub job_name_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            aws_region: DEFAULT_AWS_REGION.to_string(),
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            aws_endpoint_url: None,
            bucket: String::new(),
            key_prefix: None,
            media_uri_scheme: DEFAULT_MEDIA_URI_SCHEME.to_string(),
            results_object_key: None,
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            staging_dir: PathBuf::from("."),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            audio_format: AudioFormat::default(),
            polly_engine: None,
            sample_rate: None,
            transcription_language: DEFAULT_TRANSCRIPTION_LANGUAGE.to_string(),
            audio_name_prefix: DEFAULT_AUDIO_NAME_PREFIX.to_string(),
            audio_name_suffix: DEFAULT_AUDIO_NAME_SUFFIX.to_string(),
            job_name_prefix: DEFAULT_JOB_NAME_PREFIX.to_string(),
        }
    }
}

/// Zeroize AWS secrets when the configuration is dropped.
impl Drop for PipelineConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.aws_access_key_id {
            key.zeroize();
        }
        if let Some(ref mut secret) = self.aws_secret_access_key {
            secret.zeroize();
        }
        if let Some(ref mut token) = self.aws_session_token {
            token.zeroize();
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables and validate it.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or validation fails.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base.
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables or YAML values have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // .env is loaded in main.rs before this runs
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), String> {
        validation::validate_bucket(&self.bucket)?;
        validation::validate_credentials(&self.aws_access_key_id, &self.aws_secret_access_key)?;
        validation::validate_endpoint(&self.aws_endpoint_url)?;
        validation::validate_media_uri_scheme(&self.media_uri_scheme)?;
        validation::validate_audio_format(self.audio_format, self.sample_rate)?;
        validation::validate_language_codes(&[
            ("source_language", &self.source_language),
            ("target_language", &self.target_language),
            ("transcription_language", &self.transcription_language),
        ])?;
        validation::validate_name_part("audio_name_prefix", &self.audio_name_prefix)?;
        validation::validate_name_part("audio_name_suffix", &self.audio_name_suffix)?;
        validation::validate_name_part("job_name_prefix", &self.job_name_prefix)?;
        Ok(())
    }

    /// Check if explicit AWS credentials are provided.
    pub fn has_explicit_credentials(&self) -> bool {
        self.aws_access_key_id.is_some() && self.aws_secret_access_key.is_some()
    }
}
