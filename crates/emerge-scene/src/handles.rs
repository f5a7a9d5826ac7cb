//! Typed references to scene nodes and mesh components.

/// Opaque handle to a node in the scene graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u32);

/// A single point (vertex) of a mesh node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointRef {
    /// Mesh node owning the point.
    pub node: NodeHandle,
    /// Point index within the mesh.
    pub index: u32,
}

impl PointRef {
    /// Create a point reference.
    pub const fn new(node: NodeHandle, index: u32) -> Self {
        Self { node, index }
    }
}

/// A single edge of a mesh node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeRef {
    /// Mesh node owning the edge.
    pub node: NodeHandle,
    /// Edge index within the mesh.
    pub index: u32,
}

impl EdgeRef {
    /// Create an edge reference.
    pub const fn new(node: NodeHandle, index: u32) -> Self {
        Self { node, index }
    }
}

/// A member of a selection group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentRef {
    /// A point component.
    Point(PointRef),
    /// An edge component.
    Edge(EdgeRef),
}

impl ComponentRef {
    /// The mesh node the component belongs to.
    pub fn node(&self) -> NodeHandle {
        match self {
            ComponentRef::Point(p) => p.node,
            ComponentRef::Edge(e) => e.node,
        }
    }
}
