//! Scene capability surface for the emerge pipeline.
//!
//! The generators never own geometry: they drive a host scene through the
//! [`ScenePort`] trait using typed handles. [`MemoryScene`] is a complete
//! in-memory implementation used as the reference collaborator.

mod aabb;
mod error;
mod handles;
mod memory;
mod port;

pub use aabb::Aabb;
pub use error::SceneError;
pub use handles::{ComponentRef, EdgeRef, NodeHandle, PointRef};
pub use memory::{
    AssetTemplate, ComponentIndex, MemoryScene, Mesh, NodeTemplate, SelectionSetTemplate,
    rotation_from_degrees,
};
pub use port::ScenePort;
