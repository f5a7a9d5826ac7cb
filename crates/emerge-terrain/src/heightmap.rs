//! Multi-octave sum-of-sinusoids height function.
//!
//! Each octave doubles the planar frequency and halves the amplitude. The seed
//! only shifts each octave's phase, so the function is a smooth closed form
//! with no lookup tables. The constants are fixed; changing any of them changes
//! every generated terrain.

use emerge_config::TerrainConfig;

use crate::seed::{det_cos, det_sin};

/// Largest absolute value of one octave's unit noise (`1 + 0.5 + 0.25`).
pub const OCTAVE_NOISE_BOUND: f64 = 1.75;

/// Parameters of the fractal height function.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    /// Phase seed.
    pub seed: i64,
    /// Number of octaves to sum.
    pub octaves: u32,
    /// Amplitude of the first octave.
    pub max_height: f64,
    /// Terrain side length; the first octave's frequency is `1 / extent`.
    pub extent: f64,
}

impl HeightmapParams {
    /// Take the height parameters of a terrain config with a resolved seed.
    pub fn from_config(config: &TerrainConfig, seed: i64) -> Self {
        Self {
            seed,
            octaves: config.octaves,
            max_height: config.max_height,
            extent: config.extent,
        }
    }
}

/// Evaluates the fractal height function at planar coordinates.
///
/// Deterministic: the same parameters and coordinates always give the same
/// height, on every platform.
#[derive(Clone, Debug)]
pub struct HeightmapSampler {
    params: HeightmapParams,
    /// Per-octave `(phase_x, phase_z)`, which depend only on the seed.
    phases: Vec<(f64, f64)>,
}

impl HeightmapSampler {
    /// Create a sampler, precomputing the per-octave phases.
    pub fn new(params: HeightmapParams) -> Self {
        let phases = (0..params.octaves)
            .map(|octave| {
                let offset_base = params.seed as f64 + f64::from(octave) * 1000.0;
                (
                    det_sin(offset_base * 0.001) * 10.0,
                    det_cos(offset_base * 0.001) * 10.0,
                )
            })
            .collect();
        Self { params, phases }
    }

    /// Height at planar coordinates `(x, z)`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut height = 0.0;
        let mut amplitude = self.params.max_height;
        let mut frequency = 1.0 / self.params.extent;

        for (octave, &(phase_x, phase_z)) in self.phases.iter().enumerate() {
            let shift = octave as f64 * 100.0;
            let sx = x * frequency + shift + phase_x;
            let sz = z * frequency + shift + phase_z;
            height += octave_noise(sx, sz) * amplitude;

            amplitude *= 0.5;
            frequency *= 2.0;
        }

        height
    }

    /// Upper bound of `|sample(x, z)|` over all coordinates:
    /// `1.75 * |max_height| * (2 - 2^(1 - octaves))`.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.max_height.abs();
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= 0.5;
        }
        sum * OCTAVE_NOISE_BOUND
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}

/// Unit noise of one octave at shifted coordinates.
#[inline]
pub fn octave_noise(sx: f64, sz: f64) -> f64 {
    det_sin(sx * 2.5) * det_cos(sz * 3.7)
        + det_sin(sx * 1.3 + sz * 2.1) * 0.5
        + det_cos(sx * 4.2 - sz * 1.8) * 0.25
}
