//! Validation methods for PolyMesh.
//!
//! Provides:
//! - Arena consistency checks (face, edge and vertex cross references)
//! - Manifold edge checking

use super::types::{EdgeId, MeshError};
use super::{PolyMesh, edge_key};

impl PolyMesh {
    /// Validate the mesh topology.
    ///
    /// Removed elements are skipped. Checks that every live face has at
    /// least three distinct corners whose edges point back at it, that every
    /// live edge only references live faces containing it, and that the edge
    /// map and vertex incidence lists agree with the edges.
    pub fn validate(&self) -> Result<(), MeshError> {
        for face in self.faces() {
            let n = face.vertices.len();
            if n < 3 {
                return Err(MeshError::InvalidTopology(format!(
                    "Face {:?} has {} corners",
                    face.id, n
                )));
            }
            if face.edges.len() != n {
                return Err(MeshError::InvalidTopology(format!(
                    "Face {:?} has {} corners but {} edges",
                    face.id,
                    n,
                    face.edges.len()
                )));
            }

            for k in 0..n {
                let (u, w) = (face.vertices[k], face.vertices[(k + 1) % n]);
                if face.vertices[k + 1..].contains(&u) {
                    return Err(MeshError::RepeatedVertex(u));
                }
                let edge = self
                    .edge(face.edges[k])
                    .ok_or(MeshError::MissingEdge(face.edges[k]))?;
                if edge_key(edge.vertices[0], edge.vertices[1]) != edge_key(u, w) {
                    return Err(MeshError::InvalidTopology(format!(
                        "Face {:?} side {} does not match edge {:?}",
                        face.id, k, edge.id
                    )));
                }
                if !edge.faces.contains(&face.id) {
                    return Err(MeshError::InvalidTopology(format!(
                        "Edge {:?} does not list face {:?}",
                        edge.id, face.id
                    )));
                }
            }
        }

        for edge in self.edges() {
            for &face_id in &edge.faces {
                let face = self.face(face_id).ok_or(MeshError::MissingFace(face_id))?;
                if !face.edges.contains(&edge.id) {
                    return Err(MeshError::InvalidTopology(format!(
                        "Face {:?} does not list edge {:?}",
                        face_id, edge.id
                    )));
                }
            }

            let [a, b] = edge.vertices;
            if self.edge_map.get(&edge_key(a, b)) != Some(&edge.id) {
                return Err(MeshError::InvalidTopology(format!(
                    "Edge map out of date for {:?}",
                    edge.id
                )));
            }
            for v in [a, b] {
                let vertex = self.vertex(v).ok_or(MeshError::MissingVertex(v))?;
                if !vertex.edges.contains(&edge.id) {
                    return Err(MeshError::InvalidTopology(format!(
                        "Vertex {:?} does not list edge {:?}",
                        v, edge.id
                    )));
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Manifold Validation
    // =========================================================================

    /// Check that every edge borders at most two faces.
    pub fn check_manifold(&self) -> Result<(), ManifoldError> {
        match self.edges().find(|e| e.faces.len() > 2) {
            Some(edge) => Err(ManifoldError::NonManifoldEdge {
                edge_id: edge.id,
                face_count: edge.faces.len(),
            }),
            None => Ok(()),
        }
    }

    /// All live edges bordering more than two faces, in ID order.
    pub fn non_manifold_edges(&self) -> Vec<EdgeId> {
        self.edges()
            .filter(|e| e.faces.len() > 2)
            .map(|e| e.id)
            .collect()
    }
}

/// Error types for manifold validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifoldError {
    /// An edge is shared by more than 2 faces
    NonManifoldEdge { edge_id: EdgeId, face_count: usize },
}

impl std::fmt::Display for ManifoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonManifoldEdge {
                edge_id,
                face_count,
            } => {
                write!(
                    f,
                    "Non-manifold edge {:?}: shared by {} faces",
                    edge_id, face_count
                )
            }
        }
    }
}

impl std::error::Error for ManifoldError {}
