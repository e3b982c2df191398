//! Amazon Transcribe batch job submitter.
//!
//! Starts a transcription job for audio already stored in S3 and returns as
//! soon as the service accepts it. The job is never polled.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_transcribe::Client as TranscribeClient;
use aws_sdk_transcribe::error::DisplayErrorContext;
use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat};
use tracing::{debug, error};

use crate::core::stt::base::{TranscriptionJob, TranscriptionRequest, TranscriptionSubmitter};
use crate::errors::{PipelineError, PipelineResult};

/// Maximum length of a transcription job name.
pub const MAX_JOB_NAME_LENGTH: usize = 200;

/// Check a job name against the service naming rules (`[0-9A-Za-z._-]`, 1-200 chars).
pub fn is_valid_job_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_JOB_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Amazon Transcribe implementation of [`TranscriptionSubmitter`].
pub struct AwsTranscribeSubmitter {
    client: TranscribeClient,
}

impl AwsTranscribeSubmitter {
    /// Build a Transcribe client from a shared SDK configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: TranscribeClient::new(sdk_config),
        }
    }
}

#[async_trait]
impl TranscriptionSubmitter for AwsTranscribeSubmitter {
    async fn submit(&self, request: &TranscriptionRequest) -> PipelineResult<TranscriptionJob> {
        if !is_valid_job_name(&request.job_name) {
            return Err(PipelineError::Submission(format!(
                "Invalid transcription job name: {}",
                request.job_name
            )));
        }

        debug!(
            job_name = %request.job_name,
            media_uri = %request.media_uri,
            language_code = %request.language_code,
            "Starting Amazon Transcribe job"
        );

        let media = Media::builder().media_file_uri(&request.media_uri).build();

        let response = self
            .client
            .start_transcription_job()
            .transcription_job_name(&request.job_name)
            .language_code(LanguageCode::from(request.language_code.as_str()))
            .media_format(MediaFormat::from(request.media_format.as_str()))
            .media(media)
            .output_bucket_name(&request.output_bucket)
            .send()
            .await
            .map_err(|e| {
                error!(
                    job_name = %request.job_name,
                    error = %DisplayErrorContext(&e),
                    "Transcribe API error"
                );
                PipelineError::Submission(format!(
                    "Transcribe API error for job {}: {}",
                    request.job_name,
                    DisplayErrorContext(&e)
                ))
            })?;

        let status = response
            .transcription_job()
            .and_then(|job| job.transcription_job_status())
            .map(|status| status.as_str().to_string());

        Ok(TranscriptionJob::accepted(request, status))
    }

    fn provider_name(&self) -> &'static str {
        "aws-transcribe"
    }
}
