//! Request-level features built from the core components

pub mod summarize;

pub use summarize::{PipelineStage, Summary, SummaryService};
