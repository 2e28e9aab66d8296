// file: src/pipeline/mod.rs
// description: session orchestration and embedding progress exports
// reference: pipeline orchestration

mod progress;
mod session;

pub use progress::{PipelineStats, ProgressTracker};
pub use session::{AiServices, DiagnosisSession, EmbedOutcome};
