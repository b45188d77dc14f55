//! Polygon mesh arena for local topology editing.
//!
//! Provides the adjacency queries and edit primitives (edge dissolve, edge
//! creation, face split) that mesh clean-up tools are written against:
//! - [`PolyMesh`] - vertices, edges and faces addressed by stable ids
//! - [`MeshError`] - construction and edit failures
//! - [`ManifoldError`] - manifold validation failures
//!
//! Removed elements are tombstoned rather than deleted, so an id obtained
//! before an edit can always be checked with `is_*_valid` afterwards. Call
//! [`PolyMesh::compact`] once editing is done to drop them.

mod construction;
#[cfg(feature = "bevy")]
mod export;
mod modification;
mod selection;
mod topology;
mod types;
mod validation;

use std::collections::HashMap;

pub use modification::CompactionMap;
pub use types::{Edge, EdgeId, Face, FaceId, MeshError, Vertex, VertexId};
pub use validation::ManifoldError;

/// Polygon mesh with arena storage
///
/// Faces may have any degree of at least three. Edges bordering more than two
/// faces are representable so that non-manifold input can be detected.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,
    /// Map from sorted vertex pair to edge
    pub(crate) edge_map: HashMap<(VertexId, VertexId), EdgeId>,
}

/// Canonical key for an undirected vertex pair.
pub(crate) fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}
