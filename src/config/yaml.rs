use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override the environment.
///
/// # Example YAML structure
/// ```yaml
/// aws:
///   region: "ap-northeast-1"
///   access_key_id: "AKID..."
///   secret_access_key: "secret"
///   endpoint_url: "http://localhost:4566"
///
/// storage:
///   bucket: "my-media-bucket"
///   key_prefix: "runs/2024"
///   media_uri_scheme: "s3"
///   results_object_key: "translated_text.txt"
///
/// io:
///   input_path: "./input.txt"
///   output_path: "translated_text.txt"
///   staging_dir: "/tmp/pipeline"
///
/// translation:
///   source_language: "ja"
///   target_language: "en"
///
/// synthesis:
///   voice_id: "Joanna"
///   audio_format: "mp3"
///   engine: "neural"
///   sample_rate: 24000
///
/// transcription:
///   language_code: "en-US"
///
/// naming:
///   audio_prefix: "audioFile"
///   audio_suffix: "output"
///   job_prefix: "transcription-job"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub aws: Option<AwsYaml>,
    pub storage: Option<StorageYaml>,
    pub io: Option<IoYaml>,
    pub translation: Option<TranslationYaml>,
    pub synthesis: Option<SynthesisYaml>,
    pub transcription: Option<TranscriptionYaml>,
    pub naming: Option<NamingYaml>,
}

/// AWS connection settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AwsYaml {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Object storage settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageYaml {
    pub bucket: Option<String>,
    pub key_prefix: Option<String>,
    pub media_uri_scheme: Option<String>,
    pub results_object_key: Option<String>,
}

/// Local file locations from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IoYaml {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub staging_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TranslationYaml {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

/// Speech synthesis settings from YAML
///
/// Format and engine stay strings here and are parsed during the merge, so
/// the error names the offending field.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SynthesisYaml {
    pub voice_id: Option<String>,
    pub audio_format: Option<String>,
    pub engine: Option<String>,
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TranscriptionYaml {
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NamingYaml {
    pub audio_prefix: Option<String>,
    pub audio_suffix: Option<String>,
    pub job_prefix: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
aws:
  region: "us-east-1"
  access_key_id: "AKIDYAML"
  secret_access_key: "yaml-secret"
  endpoint_url: "http://localhost:4566"

storage:
  bucket: "media-bucket"
  key_prefix: "runs"
  results_object_key: "results/translated_text.txt"

io:
  input_path: "/data/input.txt"
  staging_dir: "/tmp/stage"

translation:
  source_language: "ja"
  target_language: "en"

synthesis:
  voice_id: "Mizuki"
  audio_format: "ogg_vorbis"
  engine: "standard"
  sample_rate: 22050

transcription:
  language_code: "en-GB"

naming:
  job_prefix: "nightly-job"
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let aws = config.aws.as_ref().unwrap();
        assert_eq!(aws.region, Some("us-east-1".to_string()));
        assert_eq!(aws.endpoint_url, Some("http://localhost:4566".to_string()));
        assert!(aws.session_token.is_none());

        let storage = config.storage.as_ref().unwrap();
        assert_eq!(storage.bucket, Some("media-bucket".to_string()));
        assert_eq!(
            storage.results_object_key,
            Some("results/translated_text.txt".to_string())
        );
        assert!(storage.media_uri_scheme.is_none());

        let io = config.io.as_ref().unwrap();
        assert_eq!(io.input_path, Some("/data/input.txt".to_string()));
        assert!(io.output_path.is_none());

        let synthesis = config.synthesis.as_ref().unwrap();
        assert_eq!(synthesis.audio_format, Some("ogg_vorbis".to_string()));
        assert_eq!(synthesis.sample_rate, Some(22050));

        assert_eq!(
            config.transcription.as_ref().unwrap().language_code,
            Some("en-GB".to_string())
        );
        let naming = config.naming.as_ref().unwrap();
        assert_eq!(naming.job_prefix, Some("nightly-job".to_string()));
        assert!(naming.audio_prefix.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config: YamlConfig = serde_yaml::from_str("{}").unwrap();

        assert!(config.aws.is_none());
        assert!(config.storage.is_none());
        assert!(config.synthesis.is_none());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pipeline.yaml");

        fs::write(&config_path, "storage:\n  bucket: \"from-file\"\n").unwrap();

        let config = YamlConfig::from_file(&config_path).unwrap();

        assert_eq!(
            config.storage.as_ref().unwrap().bucket,
            Some("from-file".to_string())
        );
    }

    #[test]
    fn test_from_file_not_found() {
        let path = PathBuf::from("/nonexistent/pipeline.yaml");
        let result = YamlConfig::from_file(&path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.yaml");

        fs::write(&config_path, "invalid: yaml: content:").unwrap();

        let result = YamlConfig::from_file(&config_path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse YAML")
        );
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let result: Result<YamlConfig, _> =
            serde_yaml::from_str("synthesis:\n  sample_rate: \"high\"\n");
        assert!(result.is_err());
    }
}
