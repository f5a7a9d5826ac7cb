//! Applies a part's deformation list to the scene.

use std::collections::HashSet;

use emerge_config::{DeformationSpec, PartConfig, RandomRange};
use emerge_scene::{ComponentRef, NodeHandle, PointRef, ScenePort};
use rand::Rng;

use crate::report::{DeformationReport, SkipReason, SpecOutcome};

/// Draw a scale factor uniformly from the closed range.
///
/// The range must already be validated (`0 < min <= max`); a degenerate range
/// always yields `min`.
pub fn sample_factor<R: Rng + ?Sized>(range: &RandomRange, rng: &mut R) -> f64 {
    rng.random_range(range.min..=range.max)
}

/// Applies randomized, axis-masked scaling to selection groups of a part.
///
/// Application is best-effort and non-transactional: a spec that cannot be
/// resolved is skipped and earlier scalings stay in effect.
#[derive(Debug, Clone, Copy)]
pub struct DeformationEngine {
    /// Only deform group members below the part's geometry node.
    pub scope_to_part: bool,
}

impl Default for DeformationEngine {
    fn default() -> Self {
        Self {
            scope_to_part: true,
        }
    }
}

impl DeformationEngine {
    /// Create an engine that scopes groups to the part being deformed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every spec of `config` to the part rooted at `geometry`, in list order.
    ///
    /// One factor is drawn from `rng` per resolved, active spec. Never fails:
    /// per-spec problems are logged and reported in the returned outcomes.
    pub fn apply<S, R>(
        &self,
        part_id: &str,
        geometry: NodeHandle,
        config: &PartConfig,
        scene: &mut S,
        rng: &mut R,
    ) -> DeformationReport
    where
        S: ScenePort + ?Sized,
        R: Rng + ?Sized,
    {
        let outcomes = config
            .deformations
            .iter()
            .map(|spec| self.apply_spec(part_id, geometry, spec, scene, rng))
            .collect();

        let report = DeformationReport {
            part: part_id.to_string(),
            outcomes,
        };
        tracing::debug!(
            "{}: {} of {} deformation(s) applied",
            part_id,
            report.applied_count(),
            config.deformations.len()
        );
        report
    }

    fn apply_spec<S, R>(
        &self,
        part_id: &str,
        geometry: NodeHandle,
        spec: &DeformationSpec,
        scene: &mut S,
        rng: &mut R,
    ) -> SpecOutcome
    where
        S: ScenePort + ?Sized,
        R: Rng + ?Sized,
    {
        let group = spec.selection_group.clone();

        if !spec.active {
            tracing::info!("{}: deformation inactive, skipping {}", part_id, group);
            return SpecOutcome::Inactive { group };
        }

        let points = match self.resolve_points(geometry, spec, scene) {
            Ok(points) => points,
            Err(reason) => {
                tracing::warn!("{}: skipping deformation of {:?}: {:?}", part_id, group, reason);
                return SpecOutcome::Skipped { group, reason };
            }
        };

        let pivot = match scene.bounding_box(&points) {
            Ok(Some(aabb)) => aabb.center(),
            Ok(None) => {
                tracing::warn!("{}: no points in {}", part_id, group);
                return SpecOutcome::Skipped {
                    group,
                    reason: SkipReason::NoPoints,
                };
            }
            Err(e) => {
                tracing::warn!("{}: cannot bound {}: {}", part_id, group, e);
                return SpecOutcome::Skipped {
                    group,
                    reason: SkipReason::Scene(e),
                };
            }
        };

        let factor = sample_factor(&spec.random_range, rng);
        let scale = spec.final_scale(factor);

        if let Err(e) = scene.scale_components(&points, scale, pivot) {
            tracing::warn!("{}: scaling {} failed: {}", part_id, group, e);
            return SpecOutcome::Skipped {
                group,
                reason: SkipReason::Scene(e),
            };
        }

        tracing::info!(
            "{}: {} scaled by {} (factor {:.3}) about {}",
            part_id,
            group,
            scale,
            factor,
            pivot
        );
        SpecOutcome::Applied {
            group,
            factor,
            scale,
            pivot,
            points: points.len(),
        }
    }

    /// Resolve a spec's group to a deduplicated point list.
    ///
    /// Point members win: edges are converted to their incident points only
    /// when the group holds no points.
    fn resolve_points<S>(
        &self,
        geometry: NodeHandle,
        spec: &DeformationSpec,
        scene: &S,
    ) -> Result<Vec<PointRef>, SkipReason>
    where
        S: ScenePort + ?Sized,
    {
        if spec.selection_group.is_empty() {
            return Err(SkipReason::MissingGroupName);
        }
        let members = scene
            .members_of(&spec.selection_group)
            .ok_or(SkipReason::GroupNotFound)?;
        if members.is_empty() {
            return Err(SkipReason::EmptyGroup);
        }

        let members: Vec<ComponentRef> = if self.scope_to_part {
            members
                .into_iter()
                .filter(|m| scene.is_descendant(m.node(), geometry))
                .collect()
        } else {
            members
        };
        if members.is_empty() {
            return Err(SkipReason::OutsidePart);
        }

        let mut points = Vec::new();
        let mut edges = Vec::new();
        for member in members {
            match member {
                ComponentRef::Point(p) => points.push(p),
                ComponentRef::Edge(e) => edges.push(e),
            }
        }
        if points.is_empty() && !edges.is_empty() {
            points = scene.edges_to_points(&edges).map_err(SkipReason::Scene)?;
        }

        let mut seen = HashSet::new();
        points.retain(|p| seen.insert(*p));

        if points.is_empty() {
            return Err(SkipReason::NoPoints);
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emerge_config::AxisMask;
    use emerge_scene::{Aabb, EdgeRef, MemoryScene, Mesh, SceneError};
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPSILON: f64 = 1e-12;

    /// Box-shaped wing with a tip group of points and a root group of edges.
    fn wing_scene() -> (MemoryScene, NodeHandle, NodeHandle) {
        let mut scene = MemoryScene::new();
        let mesh = Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(2.0, 0.0, 0.0),
                DVec3::new(2.0, 1.0, 2.0),
                DVec3::new(0.0, 1.0, 2.0),
                DVec3::new(-4.0, 0.0, 0.0),
                DVec3::new(-4.0, 0.0, 2.0),
            ],
            vec![[0, 1], [1, 2], [2, 3], [3, 0], [4, 5]],
        );
        let geo = scene.add_node("wing_geo", Some(mesh));
        let part = scene.group(&[geo], "ALAS_GENERATED").unwrap();
        scene.define_selection_set(
            "wing_tip",
            (0..4)
                .map(|i| ComponentRef::Point(PointRef::new(geo, i)))
                .collect(),
        );
        scene.define_selection_set(
            "wing_root",
            vec![ComponentRef::Edge(EdgeRef::new(geo, 4))],
        );
        (scene, part, geo)
    }

    fn spec(group: &str) -> DeformationSpec {
        DeformationSpec {
            selection_group: group.to_string(),
            ..Default::default()
        }
    }

    fn bounds(scene: &MemoryScene, geo: NodeHandle) -> Aabb {
        Aabb::from_points(scene.world_points(geo).unwrap()).unwrap()
    }

    #[test]
    fn test_factor_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let range = RandomRange::new(0.9, 1.1);
        for _ in 0..10_000 {
            let f = sample_factor(&range, &mut rng);
            assert!(range.contains(f), "factor {f} outside {range:?}");
        }
    }

    #[test]
    fn test_degenerate_range_yields_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let range = RandomRange::new(1.0, 1.0);
        for _ in 0..100 {
            assert_eq!(sample_factor(&range, &mut rng), 1.0);
        }
    }

    #[test]
    fn test_all_inactive_is_noop() {
        let (mut scene, part, geo) = wing_scene();
        let before = bounds(&scene, geo);
        let config = PartConfig {
            deformations: vec![
                DeformationSpec {
                    active: false,
                    ..spec("wing_tip")
                },
                DeformationSpec {
                    active: false,
                    random_range: RandomRange::new(2.0, 3.0),
                    ..spec("wing_root")
                },
            ],
            ..Default::default()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.applied_count(), 0);
        assert!(matches!(report.outcomes[0], SpecOutcome::Inactive { .. }));
        assert_eq!(bounds(&scene, geo), before);
    }

    #[test]
    fn test_missing_group_skipped() {
        let (mut scene, part, _) = wing_scene();
        let config = PartConfig {
            deformations: vec![spec("does_not_exist")],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.applied_count(), 0);
        assert_eq!(
            report.outcomes[0],
            SpecOutcome::Skipped {
                group: "does_not_exist".to_string(),
                reason: SkipReason::GroupNotFound
            }
        );
    }

    #[test]
    fn test_flattened_part_skipped_without_nan() {
        let (mut scene, part, geo) = wing_scene();
        scene.scale_node(part, DVec3::new(1.0, 0.0, 1.0)).unwrap();
        let before = scene.mesh(geo).unwrap().clone();
        let config = PartConfig {
            deformations: vec![spec("wing_tip")],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.applied_count(), 0);
        assert_eq!(
            report.outcomes[0],
            SpecOutcome::Skipped {
                group: "wing_tip".to_string(),
                reason: SkipReason::Scene(SceneError::SingularTransform(geo)),
            }
        );
        let mesh = scene.mesh(geo).unwrap();
        assert_eq!(mesh, &before);
        assert!(mesh.points.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_empty_group_and_missing_name_skipped() {
        let (mut scene, part, _) = wing_scene();
        scene.define_selection_set("hollow", Vec::new());
        let config = PartConfig {
            deformations: vec![spec("hollow"), spec("")],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.skipped_count(), 2);
        assert!(matches!(
            &report.outcomes[0],
            SpecOutcome::Skipped { reason: SkipReason::EmptyGroup, .. }
        ));
        assert!(matches!(
            &report.outcomes[1],
            SpecOutcome::Skipped { reason: SkipReason::MissingGroupName, .. }
        ));
    }

    #[test]
    fn test_degenerate_range_with_mask_leaves_points() {
        let (mut scene, part, geo) = wing_scene();
        let before = scene.world_points(geo).unwrap();
        let config = PartConfig {
            deformations: vec![DeformationSpec {
                base_scale: DVec3::ONE,
                random_range: RandomRange::new(1.0, 1.0),
                axis_mask: AxisMask::new(true, false, true),
                ..spec("wing_tip")
            }],
            ..Default::default()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.applied_count(), 1);
        match &report.outcomes[0] {
            SpecOutcome::Applied { scale, factor, .. } => {
                assert_eq!(*factor, 1.0);
                assert_eq!(*scale, DVec3::ONE);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        for (a, b) in before.iter().zip(scene.world_points(geo).unwrap()) {
            assert!(a.abs_diff_eq(b, EPSILON), "{a} moved to {b}");
        }
    }

    #[test]
    fn test_scales_about_bounding_box_center() {
        let (mut scene, part, geo) = wing_scene();
        let config = PartConfig {
            deformations: vec![DeformationSpec {
                random_range: RandomRange::new(2.0, 2.0),
                ..spec("wing_tip")
            }],
            ..Default::default()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        match &report.outcomes[0] {
            SpecOutcome::Applied { pivot, points, .. } => {
                assert_eq!(*pivot, DVec3::new(1.0, 0.5, 1.0));
                assert_eq!(*points, 4);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        let mesh = scene.mesh(geo).unwrap();
        assert!(mesh.points[0].abs_diff_eq(DVec3::new(-1.0, -0.5, -1.0), EPSILON));
        assert!(mesh.points[2].abs_diff_eq(DVec3::new(3.0, 1.5, 3.0), EPSILON));
        // Points outside the group are untouched.
        assert_eq!(mesh.points[4], DVec3::new(-4.0, 0.0, 0.0));
    }

    #[test]
    fn test_mask_and_base_scale_combine() {
        let (mut scene, part, _) = wing_scene();
        let config = PartConfig {
            deformations: vec![DeformationSpec {
                base_scale: DVec3::new(2.0, 3.0, 4.0),
                random_range: RandomRange::new(1.5, 1.5),
                axis_mask: AxisMask::new(true, false, true),
                ..spec("wing_tip")
            }],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);
        match &report.outcomes[0] {
            SpecOutcome::Applied { scale, .. } => assert_eq!(*scale, DVec3::new(3.0, 1.0, 6.0)),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_edge_group_converted_to_points() {
        let (mut scene, part, geo) = wing_scene();
        let config = PartConfig {
            deformations: vec![DeformationSpec {
                random_range: RandomRange::new(0.5, 0.5),
                ..spec("wing_root")
            }],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.applied_count(), 1);
        let mesh = scene.mesh(geo).unwrap();
        assert!(mesh.points[4].abs_diff_eq(DVec3::new(-4.0, 0.0, 0.5), EPSILON));
        assert!(mesh.points[5].abs_diff_eq(DVec3::new(-4.0, 0.0, 1.5), EPSILON));
    }

    #[test]
    fn test_points_win_over_edges_in_mixed_group() {
        let (mut scene, part, geo) = wing_scene();
        scene.define_selection_set(
            "mixed",
            vec![
                ComponentRef::Point(PointRef::new(geo, 0)),
                ComponentRef::Point(PointRef::new(geo, 1)),
                ComponentRef::Point(PointRef::new(geo, 1)),
                ComponentRef::Edge(EdgeRef::new(geo, 4)),
            ],
        );
        let config = PartConfig {
            deformations: vec![spec("mixed")],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert!(matches!(report.outcomes[0], SpecOutcome::Applied { points: 2, .. }));
        let mesh = scene.mesh(geo).unwrap();
        assert_eq!(mesh.points[4], DVec3::new(-4.0, 0.0, 0.0));
    }

    #[test]
    fn test_group_of_other_part_not_deformed() {
        let (mut scene, _, geo) = wing_scene();
        let other = scene.add_node("COLA_GENERATED", None);
        let before = scene.world_points(geo).unwrap();
        let config = PartConfig {
            deformations: vec![DeformationSpec {
                random_range: RandomRange::new(2.0, 2.0),
                ..spec("wing_tip")
            }],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = DeformationEngine::new().apply("COLA", other, &config, &mut scene, &mut rng);

        assert!(matches!(
            &report.outcomes[0],
            SpecOutcome::Skipped { reason: SkipReason::OutsidePart, .. }
        ));
        assert_eq!(scene.world_points(geo).unwrap(), before);

        let unscoped = DeformationEngine {
            scope_to_part: false,
        };
        let report = unscoped.apply("COLA", other, &config, &mut scene, &mut rng);
        assert_eq!(report.applied_count(), 1);
    }

    #[test]
    fn test_failed_spec_keeps_earlier_scaling() {
        let (mut scene, part, geo) = wing_scene();
        scene.define_selection_set(
            "broken",
            vec![ComponentRef::Edge(EdgeRef::new(geo, 42))],
        );
        let config = PartConfig {
            deformations: vec![
                DeformationSpec {
                    random_range: RandomRange::new(2.0, 2.0),
                    ..spec("wing_tip")
                },
                spec("broken"),
                spec("missing"),
                DeformationSpec {
                    random_range: RandomRange::new(0.5, 0.5),
                    ..spec("wing_root")
                },
            ],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = DeformationEngine::new().apply("ALAS", part, &config, &mut scene, &mut rng);

        assert_eq!(report.applied_count(), 2);
        assert_eq!(
            report.outcomes[1],
            SpecOutcome::Skipped {
                group: "broken".to_string(),
                reason: SkipReason::Scene(SceneError::UnknownEdge(EdgeRef::new(geo, 42)))
            }
        );
        let mesh = scene.mesh(geo).unwrap();
        assert!(mesh.points[2].abs_diff_eq(DVec3::new(3.0, 1.5, 3.0), EPSILON));
    }

    #[test]
    fn test_same_seed_same_factors() {
        let config = PartConfig {
            deformations: vec![spec("wing_tip"), spec("wing_root")],
            ..Default::default()
        };
        let factors = |seed| {
            let (mut scene, part, _) = wing_scene();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            DeformationEngine::new()
                .apply("ALAS", part, &config, &mut scene, &mut rng)
                .outcomes
                .into_iter()
                .filter_map(|o| match o {
                    SpecOutcome::Applied { factor, .. } => Some(factor),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        let a = factors(77);
        assert_eq!(a.len(), 2);
        assert_eq!(a, factors(77));
    }
}
