//! Media URI construction for transcription submissions
//!
//! Transcription jobs reference uploaded audio as `<scheme>://<bucket>/<key>`.
//! The URI is assembled here and checked with `url` so a malformed bucket or
//! key is caught before the submission call.

use thiserror::Error;
use url::Url;

/// Errors that can occur while building a media URI
#[derive(Debug, Error)]
pub enum MediaUriError {
    #[error("Media URI scheme must not be empty")]
    EmptyScheme,

    #[error("Media URI bucket must not be empty")]
    EmptyBucket,

    #[error("Media URI key must not be empty")]
    EmptyKey,

    #[error("Invalid media URI {uri}: {source}")]
    InvalidFormat {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Media URI {0} has no bucket host")]
    MissingHost(String),
}

/// Build `<scheme>://<bucket>/<key>`.
///
/// The returned string is exactly the concatenation; `url` is only used to
/// reject inputs that do not form a valid URI with the bucket as host.
pub fn build_media_uri(scheme: &str, bucket: &str, key: &str) -> Result<String, MediaUriError> {
    if scheme.is_empty() {
        return Err(MediaUriError::EmptyScheme);
    }
    if bucket.is_empty() {
        return Err(MediaUriError::EmptyBucket);
    }
    let key = key.trim_start_matches('/');
    if key.is_empty() {
        return Err(MediaUriError::EmptyKey);
    }

    let uri = format!("{scheme}://{bucket}/{key}");
    let parsed = Url::parse(&uri).map_err(|source| MediaUriError::InvalidFormat {
        uri: uri.clone(),
        source,
    })?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(MediaUriError::MissingHost(uri));
    }

    Ok(uri)
}
