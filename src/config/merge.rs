use std::path::PathBuf;

use super::PipelineConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;
use crate::core::tts::AudioFormat;
use crate::core::tts::aws_polly::PollyEngine;

/// Take a YAML string override only when it carries a value.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Environment configuration with YAML values applied on top.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(aws) = yaml.aws {
        if let Some(region) = non_empty(aws.region) {
            config.aws_region = region;
        }
        if let Some(key) = non_empty(aws.access_key_id) {
            config.aws_access_key_id = Some(key);
        }
        if let Some(secret) = non_empty(aws.secret_access_key) {
            config.aws_secret_access_key = Some(secret);
        }
        if let Some(token) = non_empty(aws.session_token) {
            config.aws_session_token = Some(token);
        }
        if let Some(endpoint) = non_empty(aws.endpoint_url) {
            config.aws_endpoint_url = Some(endpoint);
        }
    }

    if let Some(storage) = yaml.storage {
        if let Some(bucket) = non_empty(storage.bucket) {
            config.bucket = bucket;
        }
        if let Some(prefix) = non_empty(storage.key_prefix) {
            config.key_prefix = Some(prefix);
        }
        if let Some(scheme) = non_empty(storage.media_uri_scheme) {
            config.media_uri_scheme = scheme;
        }
        if let Some(key) = non_empty(storage.results_object_key) {
            config.results_object_key = Some(key);
        }
    }

    if let Some(io) = yaml.io {
        if let Some(path) = non_empty(io.input_path) {
            config.input_path = PathBuf::from(path);
        }
        if let Some(path) = non_empty(io.output_path) {
            config.output_path = PathBuf::from(path);
        }
        if let Some(path) = non_empty(io.staging_dir) {
            config.staging_dir = PathBuf::from(path);
        }
    }

    if let Some(translation) = yaml.translation {
        if let Some(lang) = non_empty(translation.source_language) {
            config.source_language = lang;
        }
        if let Some(lang) = non_empty(translation.target_language) {
            config.target_language = lang;
        }
    }

    if let Some(synthesis) = yaml.synthesis {
        if let Some(voice) = non_empty(synthesis.voice_id) {
            config.voice_id = voice;
        }
        if let Some(format) = non_empty(synthesis.audio_format) {
            config.audio_format = format
                .parse::<AudioFormat>()
                .map_err(|e| format!("Invalid synthesis.audio_format: {e}"))?;
        }
        if let Some(engine) = non_empty(synthesis.engine) {
            config.polly_engine = Some(
                engine
                    .parse::<PollyEngine>()
                    .map_err(|e| format!("Invalid synthesis.engine: {e}"))?,
            );
        }
        if let Some(rate) = synthesis.sample_rate {
            config.sample_rate = Some(rate);
        }
    }

    if let Some(transcription) = yaml.transcription
        && let Some(lang) = non_empty(transcription.language_code)
    {
        config.transcription_language = lang;
    }

    if let Some(naming) = yaml.naming {
        if let Some(prefix) = non_empty(naming.audio_prefix) {
            config.audio_name_prefix = prefix;
        }
        if let Some(suffix) = non_empty(naming.audio_suffix) {
            config.audio_name_suffix = suffix;
        }
        if let Some(prefix) = non_empty(naming.job_prefix) {
            config.job_name_prefix = prefix;
        }
    }

    Ok(config)
}
