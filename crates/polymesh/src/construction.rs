//! Construction methods for PolyMesh.

use glam::Vec3;
use std::collections::HashSet;

use super::types::{Edge, EdgeId, Face, FaceId, MeshError, Vertex, VertexId};
use super::{PolyMesh, edge_key};

impl PolyMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from vertex positions and index polygons
    ///
    /// Polygons may have any degree of at least three. Edges shared by more
    /// than two polygons are accepted; use [`PolyMesh::check_manifold`] to
    /// detect them.
    pub fn from_polygons<P: AsRef<[u32]>>(
        positions: &[Vec3],
        polygons: &[P],
    ) -> Result<Self, MeshError> {
        let mut mesh = Self::new();
        for &position in positions {
            mesh.add_vertex(position);
        }

        for polygon in polygons {
            let indices = polygon.as_ref();
            let mut verts = Vec::with_capacity(indices.len());
            for &index in indices {
                if index as usize >= positions.len() {
                    return Err(MeshError::InvalidVertexIndex {
                        index,
                        count: positions.len(),
                    });
                }
                verts.push(VertexId(index));
            }
            mesh.add_face(&verts)?;
        }

        let non_manifold = mesh.non_manifold_edges().len();
        if non_manifold > 0 {
            tracing::debug!(
                "from_polygons: {} non-manifold edges in {} polygons",
                non_manifold,
                polygons.len()
            );
        }

        Ok(mesh)
    }

    /// Add a new vertex to the mesh.
    ///
    /// Returns the ID of the newly created vertex.
    pub fn add_vertex(&mut self, position: Vec3) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id,
            position,
            edges: Vec::new(),
            selected: false,
            removed: false,
        });
        id
    }

    /// Add a face through existing vertices, creating missing edges.
    pub fn add_face(&mut self, verts: &[VertexId]) -> Result<FaceId, MeshError> {
        if verts.len() < 3 {
            return Err(MeshError::DegenerateFace(verts.len()));
        }
        let mut seen = HashSet::with_capacity(verts.len());
        for &v in verts {
            if !self.is_vertex_valid(v) {
                return Err(MeshError::MissingVertex(v));
            }
            if !seen.insert(v) {
                return Err(MeshError::RepeatedVertex(v));
            }
        }

        Ok(self.attach_face(verts.to_vec(), false))
    }

    /// Get or create the edge between two distinct, live vertices.
    pub(crate) fn ensure_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        if let Some(existing) = self.find_edge(a, b) {
            return existing;
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            vertices: [a, b],
            faces: Vec::new(),
            selected: false,
            removed: false,
        });
        self.edge_map.insert(edge_key(a, b), id);
        self.vertices[a.0 as usize].edges.push(id);
        self.vertices[b.0 as usize].edges.push(id);
        id
    }

    /// Push a face and link it into the edge lists.
    ///
    /// Callers validate `verts` first: at least three distinct live vertices.
    pub(crate) fn attach_face(&mut self, verts: Vec<VertexId>, selected: bool) -> FaceId {
        let id = FaceId(self.faces.len() as u32);
        let n = verts.len();
        let mut edges = Vec::with_capacity(n);
        for k in 0..n {
            let edge = self.ensure_edge(verts[k], verts[(k + 1) % n]);
            self.edges[edge.0 as usize].faces.push(id);
            edges.push(edge);
        }

        self.faces.push(Face {
            id,
            vertices: verts,
            edges,
            selected,
            removed: false,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_positions(count: usize) -> Vec<Vec3> {
        (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let err = PolyMesh::from_polygons(&unit_positions(3), &[[0u32, 1, 7]]).unwrap_err();
        assert_eq!(err, MeshError::InvalidVertexIndex { index: 7, count: 3 });
    }

    #[test]
    fn test_rejects_degenerate_polygon() {
        let err = PolyMesh::from_polygons(&unit_positions(3), &[vec![0u32, 1]]).unwrap_err();
        assert_eq!(err, MeshError::DegenerateFace(2));
    }

    #[test]
    fn test_rejects_repeated_vertex() {
        let err = PolyMesh::from_polygons(&unit_positions(4), &[[0u32, 1, 2, 1]]).unwrap_err();
        assert_eq!(err, MeshError::RepeatedVertex(VertexId(1)));
    }

    #[test]
    fn test_accepts_non_manifold_fan() {
        // Three triangles hinged on v0-v1
        let mesh =
            PolyMesh::from_polygons(&unit_positions(5), &[[0u32, 1, 2], [1, 0, 3], [0, 1, 4]])
                .unwrap();
        let hinge = mesh.find_edge(VertexId(0), VertexId(1)).unwrap();

        assert_eq!(mesh.edge_faces(hinge).len(), 3);
        assert_eq!(mesh.non_manifold_edges(), vec![hinge]);
    }

    #[test]
    fn test_add_face_reuses_edges() {
        let mut mesh = PolyMesh::new();
        let v: Vec<VertexId> = unit_positions(4)
            .into_iter()
            .map(|p| mesh.add_vertex(p))
            .collect();

        mesh.add_face(&[v[0], v[1], v[2]]).unwrap();
        mesh.add_face(&[v[0], v[2], v[3]]).unwrap();

        assert_eq!(mesh.edge_count(), 5);
        assert!(mesh.validate().is_ok());
    }
}
