use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use crate::core::tts::AudioFormat;
use crate::errors::PipelineResult;

/// Where an uploaded object lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

/// Synthesized speech after upload. The remote copy is owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArtifact {
    /// Generated file name, also the last key segment
    pub name: String,
    pub format: AudioFormat,
    pub size_bytes: u64,
    pub location: ObjectLocation,
}

/// Durable object storage capability.
///
/// `put` overwrites silently when `key` already exists. Bucket existence and
/// write permission are the caller's concern.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, content: Bytes) -> PipelineResult<()>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str {
        "storage"
    }
}

/// Build an object key from an optional prefix and an artifact name.
///
/// Path format:
/// - With prefix: `{prefix}/{name}`
/// - Without prefix: `{name}`
///
/// Surrounding whitespace and trailing slashes on the prefix are ignored.
pub fn build_object_key(prefix: Option<&str>, name: &str) -> String {
    let normalized_prefix = prefix
        .map(|p| p.trim().trim_end_matches('/'))
        .filter(|p| !p.is_empty());

    match normalized_prefix {
        Some(prefix) => format!("{}/{}", prefix, name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key_with_prefix() {
        let key = build_object_key(Some("audio"), "audioFile-20240102030405-output.mp3");
        assert_eq!(key, "audio/audioFile-20240102030405-output.mp3");
    }

    #[test]
    fn test_build_key_without_prefix() {
        let key = build_object_key(None, "audioFile-20240102030405-output.mp3");
        assert_eq!(key, "audioFile-20240102030405-output.mp3");
    }

    #[test]
    fn test_build_key_with_trailing_slash() {
        let key = build_object_key(Some("pipeline/audio/"), "a.mp3");
        assert_eq!(key, "pipeline/audio/a.mp3");
    }

    #[test]
    fn test_build_key_with_blank_prefix() {
        assert_eq!(build_object_key(Some("  "), "a.mp3"), "a.mp3");
        assert_eq!(build_object_key(Some("/"), "a.mp3"), "a.mp3");
    }
}
