//! Height samples over the terrain lattice.

use emerge_config::ValidationError;

use crate::heightmap::HeightmapSampler;

/// One ephemeral height value at lattice coordinates `(grid_u, grid_v)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub grid_u: usize,
    pub grid_v: usize,
    pub height: f64,
}

/// Heights of a `resolution x resolution` lattice spanning `[-extent/2, extent/2]`
/// on both planar axes.
///
/// Sample `v * resolution + u` lies at `x = -extent/2 + u * extent/subdivisions`,
/// `z = -extent/2 + v * extent/subdivisions`, matching the point order of
/// [`emerge_scene::ScenePort::create_grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    resolution: usize,
    extent: f64,
    heights: Vec<f64>,
}

impl HeightField {
    /// Evaluate `sampler` at every lattice point. `O(subdivisions^2 * octaves)`.
    ///
    /// Zero subdivisions is rejected, as is a sampler whose extent is not
    /// positive and finite.
    pub fn generate(
        sampler: &HeightmapSampler,
        subdivisions: u32,
    ) -> Result<Self, ValidationError> {
        if subdivisions == 0 {
            return Err(ValidationError::ZeroSubdivisions);
        }
        let extent = sampler.params().extent;
        if !extent.is_finite() {
            return Err(ValidationError::NonFiniteValue("extent"));
        }
        if extent <= 0.0 {
            return Err(ValidationError::NonPositiveExtent(extent));
        }
        let resolution = subdivisions as usize + 1;
        let mut field = Self {
            resolution,
            extent,
            heights: Vec::with_capacity(resolution * resolution),
        };

        for v in 0..resolution {
            for u in 0..resolution {
                let (x, z) = field.planar_position(u, v);
                field.heights.push(sampler.sample(x, z));
            }
        }
        Ok(field)
    }

    /// Points per side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Planar `(x, z)` of lattice point `(u, v)` before the grid is moved.
    pub fn planar_position(&self, u: usize, v: usize) -> (f64, f64) {
        let step = self.extent / (self.resolution - 1) as f64;
        let half = self.extent * 0.5;
        (-half + u as f64 * step, -half + v as f64 * step)
    }

    /// Height at lattice point `(u, v)`.
    pub fn height(&self, u: usize, v: usize) -> Option<f64> {
        if u >= self.resolution || v >= self.resolution {
            return None;
        }
        self.heights.get(v * self.resolution + u).copied()
    }

    /// Heights in scene point order.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Every sample with its lattice coordinates.
    pub fn samples(&self) -> impl Iterator<Item = HeightSample> + '_ {
        self.heights.iter().enumerate().map(|(i, &height)| HeightSample {
            grid_u: i % self.resolution,
            grid_v: i / self.resolution,
            height,
        })
    }

    /// Lowest and highest height.
    pub fn min_max(&self) -> (f64, f64) {
        self.heights
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Uniform Laplacian smoothing over the 4-neighbourhood.
    ///
    /// Each pass moves every height halfway toward the mean of the neighbours it
    /// has; edge and corner points use their 3 or 2 neighbours.
    pub fn smooth(&mut self, passes: u32) {
        let n = self.resolution;
        for _ in 0..passes {
            let prev = self.heights.clone();
            for v in 0..n {
                for u in 0..n {
                    let mut sum = 0.0;
                    let mut count = 0.0;
                    if u > 0 {
                        sum += prev[v * n + u - 1];
                        count += 1.0;
                    }
                    if u + 1 < n {
                        sum += prev[v * n + u + 1];
                        count += 1.0;
                    }
                    if v > 0 {
                        sum += prev[(v - 1) * n + u];
                        count += 1.0;
                    }
                    if v + 1 < n {
                        sum += prev[(v + 1) * n + u];
                        count += 1.0;
                    }
                    let i = v * n + u;
                    self.heights[i] = 0.5 * prev[i] + 0.5 * sum / count;
                }
            }
        }
    }
}
