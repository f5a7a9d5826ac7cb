//! Procedural environment: fractal terrain grids and scattered cloud fields.
//!
//! Heights come from a closed-form multi-octave sum of sinusoids whose phases
//! are shifted by the seed, so a terrain is a pure function of its parameters
//! and seed. The scene only receives the finished displacements.

mod cloud;
mod error;
mod field;
mod heightmap;
mod seed;
mod synth;

pub use cloud::{CLOUD_FIELD_GROUP, CloudPlan, CloudScatter, PuffPlan, plan_cloud_field};
pub use error::TerrainError;
pub use field::{HeightField, HeightSample};
pub use heightmap::{HeightmapParams, HeightmapSampler, OCTAVE_NOISE_BOUND, octave_noise};
pub use seed::{GENERATED_SEED_LIMIT, det_cos, det_sin, generate_seed, resolve_seed};
pub use synth::{TerrainOutput, TerrainSynthesizer};
