pub mod cli;
pub mod core;
pub mod engine;
pub mod pipeline;
pub mod services;

pub use crate::core::{
    CompletionOutcome, InsertOutcome, PipelineError, PipelineResult, PipelineState, RejectReason,
};
pub use engine::PipelineRunner;
pub use pipeline::{BoundedPipeline, CancellationSignal, CancellationSource};
