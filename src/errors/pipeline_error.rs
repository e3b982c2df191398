//! Pipeline error types
//!
//! One variant per pipeline stage. Remote failures of any cause (auth, network,
//! quota, validation) collapse into the variant of the stage that issued the
//! call, since the pipeline never distinguishes retryable from fatal causes.

use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error raised by any pipeline stage. Every variant aborts the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Local file open/read/write/delete failure
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Translation service failure
    #[error("translation failed: {0}")]
    Translation(String),

    /// Speech synthesis failure, including reading the audio stream
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    /// Object storage upload failure
    #[error("storage upload failed: {0}")]
    Storage(String),

    /// Transcription job submission failure
    #[error("transcription submission failed: {0}")]
    Submission(String),

    /// Invalid or incomplete configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl PipelineError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Name of the stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Translation(_) => "translate",
            Self::Synthesis(_) => "synthesize",
            Self::Storage(_) => "store",
            Self::Submission(_) => "submit",
            Self::Configuration(_) => "configuration",
        }
    }
}
