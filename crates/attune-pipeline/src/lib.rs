//! Idea pipeline driving an attune decision engine.
//!
//! Each candidate idea is submitted to the engine; accepted ideas flow
//! through commit, conflict resolution, test, feedback and deployment
//! stages. After a cycle, feedback quality is offered back to the engine
//! as a development trigger.
//!
//! # Example
//! ```
//! use attune_core::{EngineConfig, SharedEngine};
//! use attune_pipeline::{Pipeline, PipelineConfig};
//!
//! let engine = SharedEngine::from_config(EngineConfig::default());
//! let mut pipeline = Pipeline::new(engine.clone(), PipelineConfig::default());
//! let report = pipeline.run_cycle().unwrap();
//! assert_eq!(report.accepted, report.evaluated);
//! assert_eq!(engine.status().timeline.total, report.accepted);
//! ```

mod error;
mod pipeline;
pub mod stages;

pub use error::PipelineError;
pub use pipeline::{CycleRecord, CycleReport, Pipeline, PipelineConfig, SkippedIdea};
pub use stages::{
    ConflictResolver, Deployer, Feedback, FeedbackCollector, FeedbackSentiment, IdeaSource,
    IdeaSpec, SpecCommitter, Tester,
};
