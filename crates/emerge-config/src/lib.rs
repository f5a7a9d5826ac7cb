//! Configuration for the emerge content-assembly pipeline.
//!
//! Loads the declarative part document (JSON or RON) into a validated,
//! read-only [`Configuration`], and persists [`PipelineSettings`] (asset
//! locations, terrain and cloud parameters) as a RON file with forward/backward
//! compatible defaults.

mod environment;
mod error;
mod parts;
mod settings;

pub use environment::{CloudFieldConfig, TerrainConfig};
pub use error::{ConfigError, NotFoundError, ValidationError};
pub use parts::{AxisMask, ConfigFormat, Configuration, DeformationSpec, PartConfig, RandomRange};
pub use settings::{PipelineSettings, VariantConvention};
