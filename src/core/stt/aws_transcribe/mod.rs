//! Amazon Transcribe batch provider.
//!
//! Submits `StartTranscriptionJob` requests for audio that already lives in
//! S3. Transcripts are written by the service into the output bucket; this
//! crate never reads them back.
//!
//! # Authentication
//!
//! Credentials come from the shared SDK configuration built in
//! [`crate::core::clients`]: explicit keys from the pipeline configuration
//! when present, otherwise the default AWS provider chain.

mod client;


pub use client::{AwsTranscribeSubmitter, MAX_JOB_NAME_LENGTH, is_valid_job_name};
