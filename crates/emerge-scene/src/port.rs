//! The capability surface the pipeline needs from a host 3D scene.

use std::path::Path;

use glam::DVec3;

use crate::aabb::Aabb;
use crate::error::SceneError;
use crate::handles::{ComponentRef, EdgeRef, NodeHandle, PointRef};

/// Operations the generators perform on a host scene.
///
/// Implementations are single-threaded and stateful; callers drive them from
/// one thread and never re-enter. Positions are world space unless stated.
pub trait ScenePort {
    // --- Components ---

    /// Members of a named selection group, or `None` if no such group exists.
    fn members_of(&self, group: &str) -> Option<Vec<ComponentRef>>;

    /// Points incident to the given edges, deduplicated, in first-seen order.
    fn edges_to_points(&self, edges: &[EdgeRef]) -> Result<Vec<PointRef>, SceneError>;

    /// World-space position of one point.
    fn point_position(&self, point: PointRef) -> Result<DVec3, SceneError>;

    /// World-space bounds of a point set, `None` when the set is empty.
    fn bounding_box(&self, points: &[PointRef]) -> Result<Option<Aabb>, SceneError> {
        let positions = points
            .iter()
            .map(|&p| self.point_position(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Aabb::from_points(positions))
    }

    /// Scale exactly these points about `pivot`, per axis. Other geometry is untouched.
    ///
    /// Fails without moving anything when a point's node has a singular world
    /// transform.
    fn scale_components(
        &mut self,
        points: &[PointRef],
        scale: DVec3,
        pivot: DVec3,
    ) -> Result<(), SceneError>;

    // --- Grids ---

    /// Create a flat `(subdivisions + 1)^2` grid of side `extent`, centered at the origin.
    ///
    /// Zero subdivisions or a non-positive extent is an error, never clamped.
    fn create_grid(
        &mut self,
        name: &str,
        subdivisions: u32,
        extent: f64,
    ) -> Result<NodeHandle, SceneError>;

    /// Add `offset` to the current position of grid point `index`.
    fn displace_point(
        &mut self,
        grid: NodeHandle,
        index: usize,
        offset: DVec3,
    ) -> Result<(), SceneError>;

    // --- Nodes ---

    /// First live node with this name.
    fn find_node(&self, name: &str) -> Option<NodeHandle>;

    /// Name of a live node.
    fn node_name(&self, node: NodeHandle) -> Option<String>;

    /// Direct children of a node.
    fn children(&self, node: NodeHandle) -> Vec<NodeHandle>;

    /// Whether `node` is `ancestor` or lies below it.
    fn is_descendant(&self, node: NodeHandle, ancestor: NodeHandle) -> bool;

    /// Delete a node and everything below it.
    fn delete_node(&mut self, node: NodeHandle) -> Result<(), SceneError>;

    /// Import an authored asset, returning the new top-level nodes.
    fn import_asset(&mut self, path: &Path) -> Result<Vec<NodeHandle>, SceneError>;

    /// Create an empty group at the origin and move `children` under it.
    fn group(&mut self, children: &[NodeHandle], name: &str) -> Result<NodeHandle, SceneError>;

    /// Reparent `child` under `parent`.
    fn parent(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<(), SceneError>;

    /// Translate a node. `absolute` sets the translation, otherwise it is added.
    fn move_node(
        &mut self,
        node: NodeHandle,
        translation: DVec3,
        absolute: bool,
    ) -> Result<(), SceneError>;

    /// Set a node's rotation in degrees, extrinsic XYZ.
    fn rotate_node(&mut self, node: NodeHandle, degrees: DVec3) -> Result<(), SceneError>;

    /// Set a node's scale.
    fn scale_node(&mut self, node: NodeHandle, scale: DVec3) -> Result<(), SceneError>;

    /// Create a sphere mesh of `radius` centered at `position`.
    fn create_sphere(&mut self, name: &str, radius: f64, position: DVec3) -> NodeHandle;
}
