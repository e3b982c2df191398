use async_trait::async_trait;
use serde::Serialize;

use crate::errors::PipelineResult;

/// Parameters of one batch transcription job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionRequest {
    pub job_name: String,
    /// `<scheme>://<bucket>/<key>` of the uploaded audio
    pub media_uri: String,
    pub language_code: String,
    pub media_format: String,
    pub output_bucket: String,
}

/// A job the service accepted. Completion is never tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionJob {
    pub job_name: String,
    pub media_uri: String,
    pub language_code: String,
    pub media_format: String,
    pub output_bucket: String,
    /// Status reported at acceptance time (e.g. `IN_PROGRESS`), if any
    pub status: Option<String>,
}

impl TranscriptionJob {
    /// Job handle for an accepted request.
    pub fn accepted(request: &TranscriptionRequest, status: Option<String>) -> Self {
        Self {
            job_name: request.job_name.clone(),
            media_uri: request.media_uri.clone(),
            language_code: request.language_code.clone(),
            media_format: request.media_format.clone(),
            output_bucket: request.output_bucket.clone(),
            status,
        }
    }
}

/// Fire-and-forget transcription submission.
///
/// Success confirms that the job was accepted, nothing more.
#[async_trait]
pub trait TranscriptionSubmitter: Send + Sync {
    async fn submit(&self, request: &TranscriptionRequest) -> PipelineResult<TranscriptionJob>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str {
        "transcribe"
    }
}
