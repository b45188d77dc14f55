//! Type definitions for the polygon mesh arena.

use glam::Vec3;

/// Type-safe vertex identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Type-safe edge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// Type-safe face identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

/// A vertex in the mesh
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Vec3,
    /// Edges incident to this vertex
    pub(crate) edges: Vec<EdgeId>,
    pub selected: bool,
    pub(crate) removed: bool,
}

/// An undirected edge between two vertices
///
/// Manifold edges border at most two faces. Edges bordering more faces are
/// kept as-is so callers can detect and skip them.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub vertices: [VertexId; 2],
    /// Faces bordering this edge (empty for wire edges)
    pub(crate) faces: Vec<FaceId>,
    pub selected: bool,
    pub(crate) removed: bool,
}

impl Edge {
    /// Whether `vertex` is one of the endpoints.
    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.vertices[0] == vertex || self.vertices[1] == vertex
    }
}

/// A polygon face
///
/// `edges[k]` connects `vertices[k]` and `vertices[(k + 1) % n]`.
#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    pub(crate) vertices: Vec<VertexId>,
    pub(crate) edges: Vec<EdgeId>,
    pub selected: bool,
    pub(crate) removed: bool,
}

impl Face {
    /// Number of sides
    pub fn degree(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// Errors that can occur during mesh construction and editing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("Polygon references vertex {index} but the mesh has {count} vertices")]
    InvalidVertexIndex { index: u32, count: usize },
    #[error("Polygon has {0} vertices, at least 3 are required")]
    DegenerateFace(usize),
    #[error("Polygon repeats vertex {0:?}")]
    RepeatedVertex(VertexId),
    #[error("Vertex {0:?} does not exist")]
    MissingVertex(VertexId),
    #[error("Edge {0:?} does not exist or was removed")]
    MissingEdge(EdgeId),
    #[error("Face {0:?} does not exist or was removed")]
    MissingFace(FaceId),
    #[error("Edge {edge:?} borders {faces} faces, dissolving needs exactly 2")]
    NotDissolvable { edge: EdgeId, faces: usize },
    #[error("Edge {edge:?} cannot split face {face:?}")]
    InvalidSplit { face: FaceId, edge: EdgeId },
    #[error("Invalid mesh topology: {0}")]
    InvalidTopology(String),
}
