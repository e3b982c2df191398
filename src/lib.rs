pub mod config;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::PipelineConfig;
pub use errors::{PipelineError, PipelineResult};
pub use pipeline::{PipelineOrchestrator, PipelineRun, RecordStage, RunSettings};
