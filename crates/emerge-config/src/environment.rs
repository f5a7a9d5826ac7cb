//! Terrain and cloud field parameters.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Parameters of the fractal terrain height field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Scene node name of the terrain grid.
    pub name: String,
    /// Grid cells per side; the lattice has `subdivisions + 1` points per side.
    pub subdivisions: u32,
    /// Side length of the square grid in world units.
    pub extent: f64,
    /// Amplitude of the first noise octave.
    pub max_height: f64,
    /// Number of noise octaves, at least 1.
    pub octaves: u32,
    /// Noise seed. `None` draws a fresh one per synthesis.
    pub seed: Option<i64>,
    /// Final world-space position of the grid center.
    pub origin: DVec3,
    /// Laplacian smoothing iterations applied to the field before displacement.
    pub smoothing_passes: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            name: "terrain".to_string(),
            subdivisions: 50,
            extent: 150.0,
            max_height: 27.0,
            octaves: 4,
            seed: None,
            origin: DVec3::new(0.0, -35.0, 0.0),
            smoothing_passes: 0,
        }
    }
}

impl TerrainConfig {
    /// Reject parameters the synthesizer cannot use. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subdivisions == 0 {
            return Err(ValidationError::ZeroSubdivisions);
        }
        if self.octaves == 0 {
            return Err(ValidationError::ZeroOctaves);
        }
        if !self.extent.is_finite() {
            return Err(ValidationError::NonFiniteValue("extent"));
        }
        if self.extent <= 0.0 {
            return Err(ValidationError::NonPositiveExtent(self.extent));
        }
        if !self.max_height.is_finite() {
            return Err(ValidationError::NonFiniteValue("max height"));
        }
        if !self.origin.is_finite() {
            return Err(ValidationError::NonFiniteValue("origin"));
        }
        Ok(())
    }

    /// Number of lattice points per side.
    pub fn resolution(&self) -> usize {
        self.subdivisions as usize + 1
    }
}

/// Parameters of the scattered cloud field around the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CloudFieldConfig {
    /// Number of clouds.
    pub count: u32,
    /// Outer radius of the ring clouds are scattered in.
    pub radius: f64,
    /// Lowest cloud center height.
    pub height_min: f64,
    /// Highest cloud center height.
    pub height_max: f64,
    /// Bounds of the per-cloud size.
    pub scale_range: (f64, f64),
    /// Bounds of the number of spheres per cloud, inclusive.
    pub puffs_range: (u32, u32),
}

impl Default for CloudFieldConfig {
    fn default() -> Self {
        Self {
            count: 25,
            radius: 100.0,
            height_min: -18.0,
            height_max: 0.0,
            scale_range: (4.0, 8.0),
            puffs_range: (6, 10),
        }
    }
}

impl CloudFieldConfig {
    /// Reject parameters that cannot be sampled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let finite = [
            self.radius,
            self.height_min,
            self.height_max,
            self.scale_range.0,
            self.scale_range.1,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFiniteValue("cloud field"));
        }
        if self.radius <= 0.0 {
            return Err(ValidationError::InvalidCloudField("radius must be > 0"));
        }
        if self.height_min > self.height_max {
            return Err(ValidationError::InvalidCloudField(
                "height_min must not exceed height_max",
            ));
        }
        if self.scale_range.0 <= 0.0 || self.scale_range.0 > self.scale_range.1 {
            return Err(ValidationError::InvalidCloudField(
                "scale_range must be positive and ordered",
            ));
        }
        if self.puffs_range.0 == 0 || self.puffs_range.0 > self.puffs_range.1 {
            return Err(ValidationError::InvalidCloudField(
                "puffs_range must be positive and ordered",
            ));
        }
        Ok(())
    }
}
