use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::PipelineConfig;

/// Read a variable, treating unset and blank values the same.
pub(super) fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse a variable.
pub(super) fn parse_env<T>(name: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {name} ({raw}): {e}").into()),
        None => Ok(None),
    }
}

/// Build a configuration from defaults overlaid with environment variables.
pub(super) fn load_from_env() -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::default();

    if let Some(region) = env_var("AWS_REGION") {
        config.aws_region = region;
    }
    config.aws_access_key_id = env_var("AWS_ACCESS_KEY_ID");
    config.aws_secret_access_key = env_var("AWS_SECRET_ACCESS_KEY");
    config.aws_session_token = env_var("AWS_SESSION_TOKEN");
    config.aws_endpoint_url = env_var("AWS_ENDPOINT_URL");

    if let Some(bucket) = env_var("PIPELINE_BUCKET") {
        config.bucket = bucket;
    }
    config.key_prefix = env_var("PIPELINE_KEY_PREFIX");
    if let Some(scheme) = env_var("MEDIA_URI_SCHEME") {
        config.media_uri_scheme = scheme;
    }
    config.results_object_key = env_var("RESULTS_OBJECT_KEY");

    if let Some(path) = env_var("INPUT_PATH") {
        config.input_path = PathBuf::from(path);
    }
    if let Some(path) = env_var("OUTPUT_PATH") {
        config.output_path = PathBuf::from(path);
    }
    if let Some(path) = env_var("STAGING_DIR") {
        config.staging_dir = PathBuf::from(path);
    }

    if let Some(lang) = env_var("SOURCE_LANGUAGE") {
        config.source_language = lang;
    }
    if let Some(lang) = env_var("TARGET_LANGUAGE") {
        config.target_language = lang;
    }

    if let Some(voice) = env_var("VOICE_ID") {
        config.voice_id = voice;
    }
    if let Some(format) = parse_env("AUDIO_FORMAT")? {
        config.audio_format = format;
    }
    config.polly_engine = parse_env("POLLY_ENGINE")?;
    config.sample_rate = parse_env("SAMPLE_RATE")?;

    if let Some(lang) = env_var("TRANSCRIPTION_LANGUAGE") {
        config.transcription_language = lang;
    }

    if let Some(prefix) = env_var("AUDIO_NAME_PREFIX") {
        config.audio_name_prefix = prefix;
    }
    if let Some(suffix) = env_var("AUDIO_NAME_SUFFIX") {
        config.audio_name_suffix = suffix;
    }
    if let Some(prefix) = env_var("JOB_NAME_PREFIX") {
        config.job_name_prefix = prefix;
    }

    Ok(config)
}
