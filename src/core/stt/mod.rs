pub mod aws_transcribe;
mod base;

pub use base::{TranscriptionJob, TranscriptionRequest, TranscriptionSubmitter};

pub use aws_transcribe::{AwsTranscribeSubmitter, MAX_JOB_NAME_LENGTH, is_valid_job_name};
