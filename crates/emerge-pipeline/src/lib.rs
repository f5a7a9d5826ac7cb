//! Generation pass orchestration.
//!
//! A [`Pipeline`] owns the loaded configuration, the per-part variant index
//! and one seeded random stream. It drives a [`emerge_scene::ScenePort`]
//! through part generation (delete, choose, import, group, place, deform) and
//! environment building (terrain, then clouds). Nothing here computes
//! geometry; the other crates do.

mod error;
mod orchestrator;
mod report;

pub use error::PipelineError;
pub use orchestrator::Pipeline;
pub use report::{
    EnvironmentReport, GeneratedPart, GenerationReport, ModelReport, PartOutcome, SkipCause,
    SkippedPart,
};
