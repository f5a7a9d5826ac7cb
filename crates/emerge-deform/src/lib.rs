//! Bounded random non-uniform scaling of named selection groups.
//!
//! Each [`emerge_config::DeformationSpec`] of a part scales the points of one
//! selection group about the center of their bounding box by
//! `base_scale * factor` on the enabled axes, with `factor` drawn once per spec
//! from its random range. Missing or empty groups are skipped, never fatal.

mod engine;
mod report;

pub use engine::{DeformationEngine, sample_factor};
pub use report::{DeformationReport, SkipReason, SpecOutcome};
