//! In-memory scene graph implementing [`ScenePort`].
//!
//! Nodes carry a translation/rotation/scale composed parent-to-child; mesh
//! nodes hold their points in local space. Importable assets are registered as
//! [`AssetTemplate`]s keyed by file name.

use std::path::Path;

use glam::{DAffine3, DQuat, DVec3};
use hashbrown::{HashMap, HashSet};

use crate::error::SceneError;
use crate::handles::{ComponentRef, EdgeRef, NodeHandle, PointRef};
use crate::port::ScenePort;

/// Points and edges of a mesh, in the owning node's local space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub points: Vec<DVec3>,
    pub edges: Vec<[u32; 2]>,
}

impl Mesh {
    /// Create a mesh from points and edges.
    pub fn new(points: Vec<DVec3>, edges: Vec<[u32; 2]>) -> Self {
        Self { points, edges }
    }

    /// Flat square lattice in the XZ plane, centered at the origin.
    ///
    /// Point `v * (n + 1) + u` sits at `x = -extent/2 + u * extent/n`,
    /// `z = -extent/2 + v * extent/n`.
    ///
    /// Fails on zero subdivisions or a non-positive or non-finite extent.
    pub fn grid(subdivisions: u32, extent: f64) -> Result<Self, SceneError> {
        if subdivisions == 0 || !extent.is_finite() || extent <= 0.0 {
            return Err(SceneError::InvalidGrid {
                subdivisions,
                extent,
            });
        }
        let n = subdivisions as usize;
        let res = n + 1;
        let step = extent / n as f64;
        let half = extent * 0.5;

        let mut points = Vec::with_capacity(res * res);
        for v in 0..res {
            for u in 0..res {
                points.push(DVec3::new(-half + u as f64 * step, 0.0, -half + v as f64 * step));
            }
        }

        let mut edges = Vec::with_capacity(2 * n * res);
        for v in 0..res {
            for u in 0..res {
                let i = (v * res + u) as u32;
                if u < n {
                    edges.push([i, i + 1]);
                }
                if v < n {
                    edges.push([i, i + res as u32]);
                }
            }
        }

        Ok(Self { points, edges })
    }

    /// Six points on the axes at distance `radius`, enough to carry the sphere's bounds.
    pub fn sphere(radius: f64) -> Self {
        let points = [DVec3::X, DVec3::NEG_X, DVec3::Y, DVec3::NEG_Y, DVec3::Z, DVec3::NEG_Z]
            .into_iter()
            .map(|axis| axis * radius)
            .collect();
        Self {
            points,
            edges: Vec::new(),
        }
    }
}

/// Rotation for extrinsic XYZ Euler angles in degrees (X applied first).
pub fn rotation_from_degrees(degrees: DVec3) -> DQuat {
    DQuat::from_rotation_z(degrees.z.to_radians())
        * DQuat::from_rotation_y(degrees.y.to_radians())
        * DQuat::from_rotation_x(degrees.x.to_radians())
}

/// Index of a component inside an [`AssetTemplate`] node's mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentIndex {
    Point(u32),
    Edge(u32),
}

/// One node created when an asset is imported.
#[derive(Clone, Debug, Default)]
pub struct NodeTemplate {
    pub name: String,
    pub translation: DVec3,
    /// `None` for transform-only nodes such as locators.
    pub mesh: Option<Mesh>,
}

/// A selection group created when an asset is imported.
#[derive(Clone, Debug, Default)]
pub struct SelectionSetTemplate {
    pub name: String,
    /// `(index into AssetTemplate::nodes, component)` pairs.
    pub members: Vec<(usize, ComponentIndex)>,
}

/// An importable authored asset.
#[derive(Clone, Debug, Default)]
pub struct AssetTemplate {
    pub nodes: Vec<NodeTemplate>,
    pub selection_sets: Vec<SelectionSetTemplate>,
}

#[derive(Clone, Debug)]
struct Node {
    name: String,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    translation: DVec3,
    rotation: DVec3,
    scale: DVec3,
    mesh: Option<Mesh>,
}

impl Node {
    fn new(name: &str, translation: DVec3, mesh: Option<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            translation,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
            mesh,
        }
    }

    fn local_transform(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(
            self.scale,
            rotation_from_degrees(self.rotation),
            self.translation,
        )
    }
}

/// Reference [`ScenePort`] holding the whole scene in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<Option<Node>>,
    selection_sets: HashMap<String, Vec<ComponentRef>>,
    assets: HashMap<String, AssetTemplate>,
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an asset importable under `file_name` (the path's final component).
    pub fn register_asset(&mut self, file_name: impl Into<String>, template: AssetTemplate) {
        self.assets.insert(file_name.into(), template);
    }

    /// Add a top-level node at the origin.
    pub fn add_node(&mut self, name: &str, mesh: Option<Mesh>) -> NodeHandle {
        self.insert(Node::new(name, DVec3::ZERO, mesh))
    }

    /// Create or replace a named selection group.
    pub fn define_selection_set(&mut self, name: &str, members: Vec<ComponentRef>) {
        self.selection_sets.insert(name.to_string(), members);
    }

    /// Mesh of a node, if it has one.
    pub fn mesh(&self, node: NodeHandle) -> Option<&Mesh> {
        self.node(node).ok()?.mesh.as_ref()
    }

    /// Local translation of a node.
    pub fn translation(&self, node: NodeHandle) -> Option<DVec3> {
        self.node(node).ok().map(|n| n.translation)
    }

    /// Local rotation of a node in degrees.
    pub fn rotation(&self, node: NodeHandle) -> Option<DVec3> {
        self.node(node).ok().map(|n| n.rotation)
    }

    /// Local scale of a node.
    pub fn scale(&self, node: NodeHandle) -> Option<DVec3> {
        self.node(node).ok().map(|n| n.scale)
    }

    /// Composite local-to-world transform of a node.
    pub fn world_transform(&self, node: NodeHandle) -> Result<DAffine3, SceneError> {
        let n = self.node(node)?;
        let local = n.local_transform();
        match n.parent {
            Some(parent) => Ok(self.world_transform(parent)? * local),
            None => Ok(local),
        }
    }

    /// World-space positions of every point of a mesh node.
    pub fn world_points(&self, node: NodeHandle) -> Result<Vec<DVec3>, SceneError> {
        let mesh = self.node(node)?.mesh.as_ref().ok_or(SceneError::NotAMesh(node))?;
        let world = self.world_transform(node)?;
        Ok(mesh.points.iter().map(|&p| world.transform_point3(p)).collect())
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Live nodes without a parent, in creation order.
    pub fn roots(&self) -> Vec<NodeHandle> {
        self.live_nodes()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(h, _)| h)
            .collect()
    }

    fn live_nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeHandle(i as u32), n)))
    }

    fn insert(&mut self, node: Node) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        handle
    }

    fn node(&self, handle: NodeHandle) -> Result<&Node, SceneError> {
        self.nodes
            .get(handle.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(SceneError::UnknownNode(handle))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(handle.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(SceneError::UnknownNode(handle))
    }

    fn mesh_mut(&mut self, handle: NodeHandle) -> Result<&mut Mesh, SceneError> {
        self.node_mut(handle)?
            .mesh
            .as_mut()
            .ok_or(SceneError::NotAMesh(handle))
    }

    fn detach(&mut self, child: NodeHandle) -> Result<(), SceneError> {
        if let Some(old) = self.node(child)?.parent {
            self.node_mut(old)?.children.retain(|&c| c != child);
        }
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    fn subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = vec![root];
        let mut i = 0;
        while i < out.len() {
            if let Ok(n) = self.node(out[i]) {
                out.extend(n.children.iter().copied());
            }
            i += 1;
        }
        out
    }
}

impl ScenePort for MemoryScene {
    fn members_of(&self, group: &str) -> Option<Vec<ComponentRef>> {
        self.selection_sets.get(group).cloned()
    }

    fn edges_to_points(&self, edges: &[EdgeRef]) -> Result<Vec<PointRef>, SceneError> {
        let mut seen = HashSet::new();
        let mut points = Vec::new();
        for &edge in edges {
            let mesh = self
                .node(edge.node)?
                .mesh
                .as_ref()
                .ok_or(SceneError::NotAMesh(edge.node))?;
            let [a, b] = *mesh
                .edges
                .get(edge.index as usize)
                .ok_or(SceneError::UnknownEdge(edge))?;
            for index in [a, b] {
                let point = PointRef::new(edge.node, index);
                if seen.insert(point) {
                    points.push(point);
                }
            }
        }
        Ok(points)
    }

    fn point_position(&self, point: PointRef) -> Result<DVec3, SceneError> {
        let mesh = self
            .node(point.node)?
            .mesh
            .as_ref()
            .ok_or(SceneError::NotAMesh(point.node))?;
        let local = *mesh
            .points
            .get(point.index as usize)
            .ok_or(SceneError::UnknownPoint(point))?;
        Ok(self.world_transform(point.node)?.transform_point3(local))
    }

    fn scale_components(
        &mut self,
        points: &[PointRef],
        scale: DVec3,
        pivot: DVec3,
    ) -> Result<(), SceneError> {
        let mut seen = HashSet::new();
        let mut updates = Vec::with_capacity(points.len());
        for &point in points {
            if !seen.insert(point) {
                continue;
            }
            let world = self.point_position(point)?;
            let scaled = pivot + (world - pivot) * scale;
            let transform = self.world_transform(point.node)?;
            let det = transform.matrix3.determinant();
            if det == 0.0 || !det.is_finite() {
                return Err(SceneError::SingularTransform(point.node));
            }
            let local = transform.inverse().transform_point3(scaled);
            updates.push((point, local));
        }

        for (point, local) in updates {
            self.mesh_mut(point.node)?.points[point.index as usize] = local;
        }
        Ok(())
    }

    fn create_grid(
        &mut self,
        name: &str,
        subdivisions: u32,
        extent: f64,
    ) -> Result<NodeHandle, SceneError> {
        let mesh = Mesh::grid(subdivisions, extent)?;
        Ok(self.add_node(name, Some(mesh)))
    }

    fn displace_point(
        &mut self,
        grid: NodeHandle,
        index: usize,
        offset: DVec3,
    ) -> Result<(), SceneError> {
        let point = self
            .mesh_mut(grid)?
            .points
            .get_mut(index)
            .ok_or(SceneError::UnknownPoint(PointRef::new(grid, index as u32)))?;
        *point += offset;
        Ok(())
    }

    fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.live_nodes().find(|(_, n)| n.name == name).map(|(h, _)| h)
    }

    fn node_name(&self, node: NodeHandle) -> Option<String> {
        self.node(node).ok().map(|n| n.name.clone())
    }

    fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn is_descendant(&self, node: NodeHandle, ancestor: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.node(h).ok().and_then(|n| n.parent);
        }
        false
    }

    fn delete_node(&mut self, node: NodeHandle) -> Result<(), SceneError> {
        self.detach(node)?;
        let doomed: HashSet<NodeHandle> = self.subtree(node).into_iter().collect();
        for &h in &doomed {
            self.nodes[h.0 as usize] = None;
        }
        for members in self.selection_sets.values_mut() {
            members.retain(|m| !doomed.contains(&m.node()));
        }
        tracing::trace!("Deleted {} node(s) under {:?}", doomed.len(), node);
        Ok(())
    }

    fn import_asset(&mut self, path: &Path) -> Result<Vec<NodeHandle>, SceneError> {
        let key = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let template = self
            .assets
            .get(&key)
            .cloned()
            .ok_or_else(|| SceneError::AssetNotFound(path.display().to_string()))?;

        let handles: Vec<NodeHandle> = template
            .nodes
            .into_iter()
            .map(|t| self.insert(Node::new(&t.name, t.translation, t.mesh)))
            .collect();

        for set in template.selection_sets {
            let members = set
                .members
                .iter()
                .filter_map(|&(node_idx, component)| {
                    let node = *handles.get(node_idx)?;
                    Some(match component {
                        ComponentIndex::Point(i) => ComponentRef::Point(PointRef::new(node, i)),
                        ComponentIndex::Edge(i) => ComponentRef::Edge(EdgeRef::new(node, i)),
                    })
                })
                .collect();
            self.selection_sets.insert(set.name, members);
        }

        Ok(handles)
    }

    fn group(&mut self, children: &[NodeHandle], name: &str) -> Result<NodeHandle, SceneError> {
        for &child in children {
            self.node(child)?;
        }
        let group = self.add_node(name, None);
        for &child in children {
            self.parent(child, group)?;
        }
        Ok(group)
    }

    fn parent(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<(), SceneError> {
        self.node(child)?;
        self.node(parent)?;
        if self.is_descendant(parent, child) {
            return Err(SceneError::ParentCycle { child, parent });
        }
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn move_node(
        &mut self,
        node: NodeHandle,
        translation: DVec3,
        absolute: bool,
    ) -> Result<(), SceneError> {
        let n = self.node_mut(node)?;
        if absolute {
            n.translation = translation;
        } else {
            n.translation += translation;
        }
        Ok(())
    }

    fn rotate_node(&mut self, node: NodeHandle, degrees: DVec3) -> Result<(), SceneError> {
        self.node_mut(node)?.rotation = degrees;
        Ok(())
    }

    fn scale_node(&mut self, node: NodeHandle, scale: DVec3) -> Result<(), SceneError> {
        self.node_mut(node)?.scale = scale;
        Ok(())
    }

    fn create_sphere(&mut self, name: &str, radius: f64, position: DVec3) -> NodeHandle {
        self.insert(Node::new(name, position, Some(Mesh::sphere(radius))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn quad() -> Mesh {
        Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(2.0, 0.0, 0.0),
                DVec3::new(2.0, 0.0, 2.0),
                DVec3::new(0.0, 0.0, 2.0),
            ],
            vec![[0, 1], [1, 2], [2, 3], [3, 0]],
        )
    }

    #[test]
    fn test_grid_layout() {
        let mesh = Mesh::grid(4, 100.0).unwrap();
        assert_eq!(mesh.points.len(), 25);
        assert_eq!(mesh.points[0], DVec3::new(-50.0, 0.0, -50.0));
        assert_eq!(mesh.points[4], DVec3::new(50.0, 0.0, -50.0));
        assert_eq!(mesh.points[12], DVec3::ZERO);
        assert_eq!(mesh.points[24], DVec3::new(50.0, 0.0, 50.0));
        assert_eq!(mesh.edges.len(), 2 * 4 * 5);
    }

    #[test]
    fn test_edges_to_points_dedups() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let points = scene
            .edges_to_points(&[EdgeRef::new(node, 0), EdgeRef::new(node, 1)])
            .unwrap();
        assert_eq!(
            points,
            vec![
                PointRef::new(node, 0),
                PointRef::new(node, 1),
                PointRef::new(node, 2)
            ]
        );
    }

    #[test]
    fn test_unknown_edge_errors() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let err = scene.edges_to_points(&[EdgeRef::new(node, 9)]).unwrap_err();
        assert_eq!(err, SceneError::UnknownEdge(EdgeRef::new(node, 9)));
    }

    #[test]
    fn test_scale_components_about_pivot() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let points = [PointRef::new(node, 1), PointRef::new(node, 2)];

        scene
            .scale_components(&points, DVec3::new(2.0, 1.0, 3.0), DVec3::new(1.0, 0.0, 1.0))
            .unwrap();

        let mesh = scene.mesh(node).unwrap();
        assert!(mesh.points[1].abs_diff_eq(DVec3::new(3.0, 0.0, -2.0), EPSILON));
        assert!(mesh.points[2].abs_diff_eq(DVec3::new(3.0, 0.0, 4.0), EPSILON));
        // Untouched points stay put.
        assert_eq!(mesh.points[0], DVec3::ZERO);
        assert_eq!(mesh.points[3], DVec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_scale_components_under_transformed_parent() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let group = scene.group(&[node], "grp").unwrap();
        scene.move_node(group, DVec3::new(10.0, 0.0, 0.0), true).unwrap();
        scene.scale_node(group, DVec3::splat(2.0)).unwrap();

        let point = PointRef::new(node, 1);
        assert!(
            scene
                .point_position(point)
                .unwrap()
                .abs_diff_eq(DVec3::new(14.0, 0.0, 0.0), EPSILON)
        );

        scene
            .scale_components(&[point], DVec3::splat(0.5), DVec3::new(10.0, 0.0, 0.0))
            .unwrap();
        assert!(
            scene
                .point_position(point)
                .unwrap()
                .abs_diff_eq(DVec3::new(12.0, 0.0, 0.0), EPSILON)
        );
    }

    #[test]
    fn test_scale_components_is_all_or_nothing_on_bad_point() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let before = scene.mesh(node).unwrap().clone();
        let result = scene.scale_components(
            &[PointRef::new(node, 1), PointRef::new(node, 99)],
            DVec3::splat(2.0),
            DVec3::ZERO,
        );
        assert!(result.is_err());
        assert_eq!(scene.mesh(node).unwrap(), &before);
    }

    #[test]
    fn test_bounding_box_default_impl() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let points: Vec<_> = (0..4).map(|i| PointRef::new(node, i)).collect();
        let aabb = scene.bounding_box(&points).unwrap().unwrap();
        assert_eq!(aabb.min, DVec3::ZERO);
        assert_eq!(aabb.max, DVec3::new(2.0, 0.0, 2.0));
        assert!(scene.bounding_box(&[]).unwrap().is_none());
    }

    #[test]
    fn test_rotation_is_extrinsic_xyz() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("pt", Some(Mesh::new(vec![DVec3::Y], Vec::new())));
        scene.rotate_node(node, DVec3::new(90.0, 90.0, 0.0)).unwrap();
        let p = scene.point_position(PointRef::new(node, 0)).unwrap();
        assert!(p.abs_diff_eq(DVec3::X, EPSILON), "got {p}");
    }

    #[test]
    fn test_move_relative_and_absolute() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("n", None);
        scene.move_node(node, DVec3::new(1.0, 2.0, 3.0), false).unwrap();
        scene.move_node(node, DVec3::new(1.0, 0.0, 0.0), false).unwrap();
        assert_eq!(scene.translation(node), Some(DVec3::new(2.0, 2.0, 3.0)));
        scene.move_node(node, DVec3::new(0.0, -35.0, 0.0), true).unwrap();
        assert_eq!(scene.translation(node), Some(DVec3::new(0.0, -35.0, 0.0)));
    }

    #[test]
    fn test_displace_point_is_relative() {
        let mut scene = MemoryScene::new();
        let grid = scene.create_grid("terrain", 2, 10.0).unwrap();
        scene.displace_point(grid, 4, DVec3::new(0.0, 3.0, 0.0)).unwrap();
        scene.displace_point(grid, 4, DVec3::new(0.0, 1.5, 0.0)).unwrap();
        assert_eq!(scene.mesh(grid).unwrap().points[4], DVec3::new(0.0, 4.5, 0.0));
        assert!(scene.displace_point(grid, 9, DVec3::Y).is_err());
    }

    #[test]
    fn test_import_registers_selection_sets() {
        let mut scene = MemoryScene::new();
        scene.register_asset(
            "wing_a.ma",
            AssetTemplate {
                nodes: vec![NodeTemplate {
                    name: "wing_geo".to_string(),
                    mesh: Some(quad()),
                    ..Default::default()
                }],
                selection_sets: vec![SelectionSetTemplate {
                    name: "wing_tip".to_string(),
                    members: vec![(0, ComponentIndex::Edge(1))],
                }],
            },
        );

        let nodes = scene.import_asset(Path::new("/models/wing_a.ma")).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            scene.members_of("wing_tip"),
            Some(vec![ComponentRef::Edge(EdgeRef::new(nodes[0], 1))])
        );
        assert!(scene.import_asset(Path::new("missing.ma")).is_err());
    }

    #[test]
    fn test_delete_purges_subtree_and_sets() {
        let mut scene = MemoryScene::new();
        let a = scene.add_node("a", Some(quad()));
        let b = scene.add_node("b", None);
        let group = scene.group(&[a, b], "grp").unwrap();
        scene.define_selection_set("corner", vec![ComponentRef::Point(PointRef::new(a, 0))]);

        scene.delete_node(group).unwrap();
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.find_node("a"), None);
        assert_eq!(scene.members_of("corner"), Some(Vec::new()));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let mut scene = MemoryScene::new();
        let a = scene.add_node("a", None);
        let b = scene.add_node("b", None);
        scene.parent(b, a).unwrap();
        assert!(scene.is_descendant(b, a));
        assert_eq!(
            scene.parent(a, b),
            Err(SceneError::ParentCycle { child: a, parent: b })
        );
    }

    #[test]
    fn test_sphere_bounds() {
        let mut scene = MemoryScene::new();
        let s = scene.create_sphere("puff", 2.0, DVec3::new(5.0, 0.0, 0.0));
        let points = scene.world_points(s).unwrap();
        let aabb = crate::Aabb::from_points(points).unwrap();
        assert_eq!(aabb.min, DVec3::new(3.0, -2.0, -2.0));
        assert_eq!(aabb.max, DVec3::new(7.0, 2.0, 2.0));
    }

    #[test]
    fn test_scale_under_flattened_parent_fails_untouched() {
        let mut scene = MemoryScene::new();
        let node = scene.add_node("quad", Some(quad()));
        let group = scene.group(&[node], "grp").unwrap();
        scene.scale_node(group, DVec3::new(1.0, 0.0, 1.0)).unwrap();
        let before = scene.mesh(node).unwrap().clone();

        let err = scene
            .scale_components(&[PointRef::new(node, 1)], DVec3::splat(2.0), DVec3::ZERO)
            .unwrap_err();
        assert_eq!(err, SceneError::SingularTransform(node));
        assert_eq!(scene.mesh(node), Some(&before));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        for (subdivisions, extent) in [(0, 10.0), (4, 0.0), (4, -1.0), (4, f64::NAN)] {
            assert!(matches!(
                Mesh::grid(subdivisions, extent),
                Err(SceneError::InvalidGrid { .. })
            ));
        }

        let mut scene = MemoryScene::new();
        assert!(scene.create_grid("terrain", 0, 10.0).is_err());
        assert_eq!(scene.node_count(), 0);
    }
}
