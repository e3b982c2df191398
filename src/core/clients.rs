//! Service client construction.
//!
//! All AWS adapters share one loaded [`SdkConfig`], so region, credentials
//! and the optional endpoint override are resolved once per run.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use tracing::info;

use crate::config::PipelineConfig;
use crate::core::storage::{ArtifactStore, S3ArtifactStore, S3StoreSettings};
use crate::core::stt::{AwsTranscribeSubmitter, TranscriptionSubmitter};
use crate::core::translate::{AwsTranslator, Translator};
use crate::core::tts::SpeechSynthesizer;
use crate::core::tts::aws_polly::{AwsPollyTTS, AwsPollyTTSConfig};

/// The four remote capabilities one run depends on.
#[derive(Clone)]
pub struct ServiceClients {
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub store: Arc<dyn ArtifactStore>,
    pub transcriber: Arc<dyn TranscriptionSubmitter>,
}

impl ServiceClients {
    /// Build every AWS adapter from the pipeline configuration.
    pub async fn from_config(config: &PipelineConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;

        let polly_config = AwsPollyTTSConfig {
            engine: config.polly_engine,
            sample_rate: config.sample_rate,
        };

        let store_settings = S3StoreSettings {
            region: config.aws_region.clone(),
            endpoint: config.aws_endpoint_url.clone(),
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
            session_token: config.aws_session_token.clone(),
        };

        let clients = Self {
            translator: Arc::new(AwsTranslator::new(&sdk_config)),
            synthesizer: Arc::new(AwsPollyTTS::new(&sdk_config, polly_config)),
            store: Arc::new(S3ArtifactStore::new(store_settings)),
            transcriber: Arc::new(AwsTranscribeSubmitter::new(&sdk_config)),
        };

        info!(
            translator = clients.translator.provider_name(),
            synthesizer = clients.synthesizer.provider_name(),
            store = clients.store.provider_name(),
            transcriber = clients.transcriber.provider_name(),
            "Service clients ready"
        );

        clients
    }
}

/// Load the shared AWS SDK configuration.
///
/// Explicit credentials from the configuration take precedence; otherwise the
/// default provider chain applies (environment, profile, instance role).
pub async fn load_sdk_config(config: &PipelineConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if let (Some(key), Some(secret)) = (
        config.aws_access_key_id.as_ref(),
        config.aws_secret_access_key.as_ref(),
    ) {
        let credentials = Credentials::new(
            key.clone(),
            secret.clone(),
            config.aws_session_token.clone(),
            None,
            "waav-pipeline",
        );
        loader = loader.credentials_provider(credentials);
    }

    if let Some(ref endpoint) = config.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    info!(
        region = %config.aws_region,
        explicit_credentials = config.has_explicit_credentials(),
        endpoint_override = config.aws_endpoint_url.is_some(),
        "Loading AWS configuration"
    );

    loader.load().await
}

/// SDK configuration pointing every client at a local mock server.
#[cfg(test)]
pub(crate) fn test_sdk_config(endpoint: &str) -> SdkConfig {
    use aws_config::retry::RetryConfig;
    use aws_credential_types::provider::SharedCredentialsProvider;

    SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
            "AKIDTEST",
            "test-secret",
            None,
            None,
            "test",
        )))
        .retry_config(RetryConfig::disabled())
        .endpoint_url(endpoint)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_credentials() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.bucket = "test-bucket".to_string();
        config.aws_region = "eu-west-1".to_string();
        config.aws_access_key_id = Some("AKIDCONFIG".to_string());
        config.aws_secret_access_key = Some("config-secret".to_string());
        config.aws_endpoint_url = Some("http://localhost:4566".to_string());
        config
    }

    #[tokio::test]
    async fn test_load_sdk_config_applies_overrides() {
        let sdk_config = load_sdk_config(&config_with_credentials()).await;

        assert_eq!(sdk_config.region().map(|r| r.as_ref()), Some("eu-west-1"));
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:4566"));
        assert!(sdk_config.credentials_provider().is_some());
    }

    #[tokio::test]
    async fn test_from_config_builds_aws_adapters() {
        let clients = ServiceClients::from_config(&config_with_credentials()).await;

        assert_eq!(clients.translator.provider_name(), "aws-translate");
        assert_eq!(clients.synthesizer.provider_name(), "aws-polly");
        assert_eq!(clients.store.provider_name(), "s3");
        assert_eq!(clients.transcriber.provider_name(), "aws-transcribe");
    }
}
