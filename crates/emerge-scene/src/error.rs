//! Scene operation errors.

use crate::handles::{EdgeRef, NodeHandle, PointRef};

/// Errors reported by a [`crate::ScenePort`] implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The handle does not name a live node.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeHandle),

    /// The node exists but carries no mesh.
    #[error("node {0:?} has no mesh")]
    NotAMesh(NodeHandle),

    /// The point index is out of range for its mesh.
    #[error("unknown point {0:?}")]
    UnknownPoint(PointRef),

    /// The edge index is out of range for its mesh.
    #[error("unknown edge {0:?}")]
    UnknownEdge(EdgeRef),

    /// No importable asset with this name.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// The node's world transform has a zero-scale axis and cannot be inverted.
    #[error("node {0:?} has a singular world transform")]
    SingularTransform(NodeHandle),

    /// Grid parameters that describe no lattice.
    #[error("invalid grid: {subdivisions} subdivisions over extent {extent}")]
    InvalidGrid {
        /// Requested cells per side.
        subdivisions: u32,
        /// Requested side length.
        extent: f64,
    },

    /// Parenting would make a node its own ancestor.
    #[error("cannot parent {child:?} under its descendant {parent:?}")]
    ParentCycle {
        /// Node being moved.
        child: NodeHandle,
        /// Requested new parent.
        parent: NodeHandle,
    },
}
