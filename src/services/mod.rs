//! Services
//!
//! Business logic for the generation engine: readiness gating, the staged
//! pipeline, template uploads and analysis, and the library collection.

pub mod analysis;
pub mod library;
pub mod pipeline;
pub mod readiness;
pub mod upload;

pub use library::{FilterState, SortOrder, TemplateLibrary, TemplateUpload};
pub use pipeline::{GenerationPipeline, PipelineEvent, PipelineTiming, RunOutcome};
pub use readiness::can_generate;
pub use upload::accept_upload;
