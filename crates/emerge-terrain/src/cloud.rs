//! Scattered puff clouds around the scene.
//!
//! Planning is pure: [`plan_cloud_field`] draws every position and size from
//! the caller's generator. [`CloudScatter::realize`] turns a plan into spheres.

use std::f64::consts::TAU;

use emerge_config::CloudFieldConfig;
use emerge_scene::{NodeHandle, ScenePort};
use glam::DVec3;
use rand::Rng;

use crate::error::TerrainError;

/// Name of the group holding every cloud.
pub const CLOUD_FIELD_GROUP: &str = "cloud_field";

/// One sphere of a cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PuffPlan {
    /// Sphere center, world space.
    pub position: DVec3,
    pub radius: f64,
}

/// One cloud: a center, a size and the spheres around it.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudPlan {
    pub center: DVec3,
    pub scale: f64,
    pub puffs: Vec<PuffPlan>,
}

/// Draw a cloud field. Fails on invalid parameters without drawing.
///
/// Per cloud the draw order is angle, distance, height, scale, puff count,
/// then per puff the x, y, z offsets and radius.
pub fn plan_cloud_field<R>(
    config: &CloudFieldConfig,
    rng: &mut R,
) -> Result<Vec<CloudPlan>, TerrainError>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let mut clouds = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        let angle = rng.random_range(0.0..TAU);
        let distance = rng.random_range(config.radius * 0.3..=config.radius);
        let y = rng.random_range(config.height_min..=config.height_max);
        let scale = rng.random_range(config.scale_range.0..=config.scale_range.1);
        let puff_count = rng.random_range(config.puffs_range.0..=config.puffs_range.1);

        let center = DVec3::new(angle.cos() * distance, y, angle.sin() * distance);
        let puffs = (0..puff_count)
            .map(|_| {
                let offset = DVec3::new(
                    rng.random_range(-scale..=scale),
                    rng.random_range(-scale * 0.3..=scale * 0.3),
                    rng.random_range(-scale * 0.7..=scale * 0.7),
                );
                PuffPlan {
                    position: center + offset,
                    radius: rng.random_range(scale * 0.3..=scale * 0.8),
                }
            })
            .collect();

        clouds.push(CloudPlan {
            center,
            scale,
            puffs,
        });
    }
    Ok(clouds)
}

/// Creates cloud fields in a scene.
#[derive(Clone, Debug, Default)]
pub struct CloudScatter {
    config: CloudFieldConfig,
}

impl CloudScatter {
    pub fn new(config: CloudFieldConfig) -> Self {
        Self { config }
    }

    /// Plan and realize a field, returning the `cloud_field` group.
    pub fn scatter<S, R>(&self, scene: &mut S, rng: &mut R) -> Result<NodeHandle, TerrainError>
    where
        S: ScenePort + ?Sized,
        R: Rng + ?Sized,
    {
        let plans = plan_cloud_field(&self.config, rng)?;
        Self::realize(&plans, scene)
    }

    /// Create one sphere per puff, group each cloud as `cloud_<i>` (from 1) and
    /// all clouds under [`CLOUD_FIELD_GROUP`].
    pub fn realize<S>(plans: &[CloudPlan], scene: &mut S) -> Result<NodeHandle, TerrainError>
    where
        S: ScenePort + ?Sized,
    {
        let mut groups = Vec::with_capacity(plans.len());
        for (i, cloud) in plans.iter().enumerate() {
            let name = format!("cloud_{}", i + 1);
            let spheres: Vec<NodeHandle> = cloud
                .puffs
                .iter()
                .enumerate()
                .map(|(j, puff)| {
                    scene.create_sphere(&format!("{name}_puff_{}", j + 1), puff.radius, puff.position)
                })
                .collect();
            groups.push(scene.group(&spheres, &name)?);
        }
        let field = scene.group(&groups, CLOUD_FIELD_GROUP)?;
        tracing::info!("Scattered {} clouds", plans.len());
        Ok(field)
    }
}
