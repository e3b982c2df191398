use crate::core::tts::AudioFormat;

/// The bucket is the one setting without a usable default.
pub(super) fn validate_bucket(bucket: &str) -> Result<(), String> {
    if bucket.trim().is_empty() {
        return Err(
            "Storage bucket is required: set PIPELINE_BUCKET or storage.bucket".to_string(),
        );
    }
    Ok(())
}

/// Explicit credentials come as a pair or not at all.
pub(super) fn validate_credentials(
    access_key_id: &Option<String>,
    secret_access_key: &Option<String>,
) -> Result<(), String> {
    match (access_key_id, secret_access_key) {
        (Some(_), None) => Err(
            "AWS_ACCESS_KEY_ID is set but AWS_SECRET_ACCESS_KEY is missing".to_string(),
        ),
        (None, Some(_)) => Err(
            "AWS_SECRET_ACCESS_KEY is set but AWS_ACCESS_KEY_ID is missing".to_string(),
        ),
        _ => Ok(()),
    }
}

pub(super) fn validate_endpoint(endpoint: &Option<String>) -> Result<(), String> {
    if let Some(endpoint) = endpoint {
        let url = url::Url::parse(endpoint)
            .map_err(|e| format!("Invalid AWS endpoint URL '{endpoint}': {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "AWS endpoint URL must use http or https, got '{}'",
                url.scheme()
            ));
        }
    }
    Ok(())
}

pub(super) fn validate_media_uri_scheme(scheme: &str) -> Result<(), String> {
    let valid = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return Err(format!("Invalid media URI scheme '{scheme}'"));
    }
    Ok(())
}

/// The format must be transcribable and the sample rate must suit it.
pub(super) fn validate_audio_format(
    format: AudioFormat,
    sample_rate: Option<u32>,
) -> Result<(), String> {
    if format.transcription_media_format().is_none() {
        return Err(format!(
            "Audio format '{format}' cannot be submitted for transcription; use mp3 or ogg_vorbis"
        ));
    }
    if let Some(rate) = sample_rate
        && !format.supported_sample_rates().contains(&rate)
    {
        return Err(format!(
            "Sample rate {rate} is not supported for {format}; supported: {:?}",
            format.supported_sample_rates()
        ));
    }
    Ok(())
}

pub(super) fn validate_language_codes(codes: &[(&str, &str)]) -> Result<(), String> {
    for (field, code) in codes {
        if code.trim().is_empty() {
            return Err(format!("{field} must not be empty"));
        }
    }
    Ok(())
}

/// Name parts end up in object keys and job names: `[0-9A-Za-z._-]+`.
pub(super) fn validate_name_part(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(format!(
            "{field} contains invalid character '{bad}'; allowed: letters, digits, '.', '_', '-'"
        ));
    }
    Ok(())
}
