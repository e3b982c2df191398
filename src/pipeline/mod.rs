//! Pipeline orchestration.
//!
//! Drives each non-blank input line through Translate → Synthesize → Store →
//! Submit, one record at a time, and aborts the run on the first failure.

pub mod orchestrator;
mod types;

pub use orchestrator::PipelineOrchestrator;
pub use types::{PipelineRun, RecordOutcome, RecordStage, RunSettings};
