//! Drives a scene grid from the height field.

use emerge_config::TerrainConfig;
use emerge_scene::{NodeHandle, ScenePort};
use glam::DVec3;

use crate::error::TerrainError;
use crate::field::HeightField;
use crate::heightmap::{HeightmapParams, HeightmapSampler};
use crate::seed::resolve_seed;

/// What a synthesis run left in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainOutput {
    /// The displaced grid node.
    pub grid: NodeHandle,
    /// Seed the height field was computed with; report it for reproduction.
    pub seed: i64,
    /// Lowest applied height offset.
    pub min_height: f64,
    /// Highest applied height offset.
    pub max_height: f64,
}

/// Builds fractal terrain grids in a scene.
#[derive(Clone, Debug, Default)]
pub struct TerrainSynthesizer {
    config: TerrainConfig,
}

impl TerrainSynthesizer {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Compute the height field for `seed` without touching a scene.
    ///
    /// Applies the configured smoothing passes.
    pub fn height_field(&self, seed: i64) -> Result<HeightField, TerrainError> {
        self.config.validate()?;
        let sampler = HeightmapSampler::new(HeightmapParams::from_config(&self.config, seed));
        let mut field = HeightField::generate(&sampler, self.config.subdivisions)?;
        if self.config.smoothing_passes > 0 {
            field.smooth(self.config.smoothing_passes);
        }
        Ok(field)
    }

    /// Create the grid, displace every point by its height, then move the grid
    /// to the configured origin.
    ///
    /// Invalid parameters fail before the scene is touched. A scene failure
    /// part-way leaves the partially displaced grid in place.
    pub fn synthesize<S>(&self, scene: &mut S) -> Result<TerrainOutput, TerrainError>
    where
        S: ScenePort + ?Sized,
    {
        self.config.validate()?;
        let seed = resolve_seed(self.config.seed);
        if self.config.seed.is_none() {
            tracing::info!("Generated terrain seed {}", seed);
        }

        let field = self.height_field(seed)?;
        let (min_height, max_height) = field.min_max();

        let grid = scene.create_grid(
            &self.config.name,
            self.config.subdivisions,
            self.config.extent,
        )?;
        for (index, &height) in field.heights().iter().enumerate() {
            scene.displace_point(grid, index, DVec3::new(0.0, height, 0.0))?;
        }
        scene.move_node(grid, self.config.origin, true)?;

        tracing::info!(
            "Terrain {:?}: {}x{} points, seed {}, heights {:.3}..{:.3}",
            self.config.name,
            field.resolution(),
            field.resolution(),
            seed,
            min_height,
            max_height,
        );

        Ok(TerrainOutput {
            grid,
            seed,
            min_height,
            max_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emerge_config::ValidationError;
    use emerge_scene::MemoryScene;

    fn single_octave_config() -> TerrainConfig {
        TerrainConfig {
            subdivisions: 4,
            extent: 100.0,
            max_height: 10.0,
            octaves: 1,
            seed: Some(42),
            ..TerrainConfig::default()
        }
    }

    fn single_octave(seed: f64, x: f64, z: f64, extent: f64, max_height: f64) -> f64 {
        let phase_x = (seed * 0.001).sin() * 10.0;
        let phase_z = (seed * 0.001).cos() * 10.0;
        let sx = x / extent + phase_x;
        let sz = z / extent + phase_z;
        let noise = (sx * 2.5).sin() * (sz * 3.7).cos()
            + (sx * 1.3 + sz * 2.1).sin() * 0.5
            + (sx * 4.2 - sz * 1.8).cos() * 0.25;
        noise * max_height
    }

    #[test]
    fn test_single_octave_center_point() {
        let mut scene = MemoryScene::new();
        let output = TerrainSynthesizer::new(single_octave_config())
            .synthesize(&mut scene)
            .unwrap();
        assert_eq!(output.seed, 42);

        // Index 12 is the lattice center, planar (0, 0).
        let mesh = scene.mesh(output.grid).unwrap();
        let expected = single_octave(42.0, 0.0, 0.0, 100.0, 10.0);
        assert!((mesh.points[12].y - expected).abs() < 1e-9);
        assert_eq!(mesh.points[12].x, 0.0);
        assert_eq!(mesh.points[12].z, 0.0);
    }

    #[test]
    fn test_single_octave_corner_point() {
        let mut scene = MemoryScene::new();
        let output = TerrainSynthesizer::new(single_octave_config())
            .synthesize(&mut scene)
            .unwrap();
        let mesh = scene.mesh(output.grid).unwrap();
        let expected = single_octave(42.0, -50.0, -50.0, 100.0, 10.0);
        assert!((mesh.points[0].y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_grid_moved_to_origin() {
        let mut scene = MemoryScene::new();
        let config = single_octave_config();
        let output = TerrainSynthesizer::new(config.clone())
            .synthesize(&mut scene)
            .unwrap();
        assert_eq!(scene.translation(output.grid), Some(config.origin));
        assert_eq!(scene.node_name(output.grid).as_deref(), Some("terrain"));
        assert_eq!(scene.mesh(output.grid).unwrap().points.len(), 25);
    }

    #[test]
    fn test_same_seed_identical_heights() {
        let config = TerrainConfig {
            subdivisions: 16,
            seed: Some(7),
            ..TerrainConfig::default()
        };
        let mut a = MemoryScene::new();
        let mut b = MemoryScene::new();
        let ga = TerrainSynthesizer::new(config.clone())
            .synthesize(&mut a)
            .unwrap()
            .grid;
        let gb = TerrainSynthesizer::new(config).synthesize(&mut b).unwrap().grid;
        assert_eq!(a.mesh(ga), b.mesh(gb));
    }

    #[test]
    fn test_generated_seed_reproduces() {
        let config = TerrainConfig {
            subdivisions: 8,
            ..TerrainConfig::default()
        };
        let mut first = MemoryScene::new();
        let output = TerrainSynthesizer::new(config.clone())
            .synthesize(&mut first)
            .unwrap();

        let replay = TerrainConfig {
            seed: Some(output.seed),
            ..config
        };
        let mut second = MemoryScene::new();
        let grid = TerrainSynthesizer::new(replay)
            .synthesize(&mut second)
            .unwrap()
            .grid;
        assert_eq!(first.mesh(output.grid), second.mesh(grid));
    }

    #[test]
    fn test_heights_within_envelope() {
        let config = TerrainConfig {
            subdivisions: 20,
            seed: Some(123),
            ..TerrainConfig::default()
        };
        let sampler = HeightmapSampler::new(HeightmapParams::from_config(&config, 123));
        let bound = sampler.max_amplitude();
        let mut scene = MemoryScene::new();
        let output = TerrainSynthesizer::new(config).synthesize(&mut scene).unwrap();
        assert!(output.min_height >= -bound);
        assert!(output.max_height <= bound);
    }

    #[test]
    fn test_zero_octaves_fails_before_scene_mutation() {
        let mut scene = MemoryScene::new();
        let config = TerrainConfig {
            octaves: 0,
            ..single_octave_config()
        };
        let err = TerrainSynthesizer::new(config)
            .synthesize(&mut scene)
            .unwrap_err();
        assert!(matches!(
            err,
            TerrainError::Validation(ValidationError::ZeroOctaves)
        ));
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn test_non_positive_extent_fails() {
        let mut scene = MemoryScene::new();
        for extent in [0.0, -10.0] {
            let config = TerrainConfig {
                extent,
                ..single_octave_config()
            };
            let err = TerrainSynthesizer::new(config)
                .synthesize(&mut scene)
                .unwrap_err();
            assert!(matches!(
                err,
                TerrainError::Validation(ValidationError::NonPositiveExtent(_))
            ));
        }
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn test_smoothing_applied_only_when_configured() {
        let rough = TerrainSynthesizer::new(TerrainConfig {
            subdivisions: 12,
            seed: Some(9),
            ..TerrainConfig::default()
        });
        let smooth = TerrainSynthesizer::new(TerrainConfig {
            smoothing_passes: 2,
            ..rough.config().clone()
        });
        let a = rough.height_field(9).unwrap();
        let b = smooth.height_field(9).unwrap();
        assert_ne!(a, b);

        let (alo, ahi) = a.min_max();
        let (blo, bhi) = b.min_max();
        assert!(bhi - blo < ahi - alo);
    }
}
