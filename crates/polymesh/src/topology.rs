//! Topology query methods for PolyMesh.
//!
//! Queries against removed elements behave as if the element had no
//! neighbours: slices come back empty and lookups return `None`.

use super::types::{Edge, EdgeId, Face, FaceId, Vertex, VertexId};
use super::{PolyMesh, edge_key};

impl PolyMesh {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get a live vertex by ID
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0 as usize).filter(|v| !v.removed)
    }

    /// Get a live edge by ID
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0 as usize).filter(|e| !e.removed)
    }

    /// Get a live face by ID
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.0 as usize).filter(|f| !f.removed)
    }

    pub fn is_vertex_valid(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    pub fn is_edge_valid(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    pub fn is_face_valid(&self, id: FaceId) -> bool {
        self.face(id).is_some()
    }

    /// Iterate live vertices in ID order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter(|v| !v.removed)
    }

    /// Iterate live edges in ID order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| !e.removed)
    }

    /// Iterate live faces in ID order
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|f| !f.removed)
    }

    /// IDs of all live faces in ascending order
    pub fn face_ids(&self) -> Vec<FaceId> {
        self.faces().map(|f| f.id).collect()
    }

    /// Number of live vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    /// Number of live edges, including wire edges
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Number of live faces
    pub fn face_count(&self) -> usize {
        self.faces().count()
    }

    // ========================================================================
    // Topology Queries
    // ========================================================================

    /// Get the vertices of a face in winding order
    pub fn face_vertices(&self, face_id: FaceId) -> &[VertexId] {
        self.face(face_id).map(|f| f.vertices.as_slice()).unwrap_or(&[])
    }

    /// Get the edges of a face in winding order
    pub fn face_edges(&self, face_id: FaceId) -> &[EdgeId] {
        self.face(face_id).map(|f| f.edges.as_slice()).unwrap_or(&[])
    }

    /// Number of sides of a face (0 for removed faces)
    pub fn face_degree(&self, face_id: FaceId) -> usize {
        self.face_vertices(face_id).len()
    }

    /// Get the two endpoints of an edge
    pub fn edge_vertices(&self, edge_id: EdgeId) -> Option<[VertexId; 2]> {
        self.edge(edge_id).map(|e| e.vertices)
    }

    /// Get the faces bordering an edge
    pub fn edge_faces(&self, edge_id: EdgeId) -> &[FaceId] {
        self.edge(edge_id).map(|e| e.faces.as_slice()).unwrap_or(&[])
    }

    /// Get the edges incident to a vertex
    pub fn vertex_edges(&self, vertex_id: VertexId) -> &[EdgeId] {
        self.vertex(vertex_id)
            .map(|v| v.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Get all faces touching a vertex, sorted by ID
    pub fn vertex_faces(&self, vertex_id: VertexId) -> Vec<FaceId> {
        let mut faces: Vec<FaceId> = self
            .vertex_edges(vertex_id)
            .iter()
            .flat_map(|&e| self.edge_faces(e).iter().copied())
            .collect();
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Find the edge connecting two vertices
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_map
            .get(&edge_key(a, b))
            .copied()
            .filter(|&e| self.is_edge_valid(e))
    }

    /// The endpoint of `edge_id` that is not `vertex_id`
    pub fn other_vertex(&self, edge_id: EdgeId, vertex_id: VertexId) -> Option<VertexId> {
        let [a, b] = self.edge_vertices(edge_id)?;
        if a == vertex_id {
            Some(b)
        } else if b == vertex_id {
            Some(a)
        } else {
            None
        }
    }

    /// Check if an edge borders exactly one face
    pub fn is_boundary_edge(&self, edge_id: EdgeId) -> bool {
        self.edge_faces(edge_id).len() == 1
    }

    /// Check if an edge borders at most two faces
    pub fn is_manifold_edge(&self, edge_id: EdgeId) -> bool {
        self.edge_faces(edge_id).len() <= 2
    }

    /// Check if any edge of a face borders more than two faces
    pub fn face_touches_non_manifold_edge(&self, face_id: FaceId) -> bool {
        self.face_edges(face_id)
            .iter()
            .any(|&e| !self.is_manifold_edge(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Two quads sharing the edge v1-v4:
    ///
    /// ```text
    /// v3---v4---v5
    ///  |    |    |
    /// v0---v1---v2
    /// ```
    fn two_quads() -> PolyMesh {
        let positions: Vec<Vec3> = (0..6)
            .map(|i| Vec3::new((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        PolyMesh::from_polygons(&positions, &[[0u32, 1, 4, 3], [1, 2, 5, 4]]).unwrap()
    }

    #[test]
    fn test_shared_edge_has_two_faces() {
        let mesh = two_quads();
        let shared = mesh.find_edge(VertexId(1), VertexId(4)).unwrap();

        assert_eq!(mesh.edge_faces(shared), &[FaceId(0), FaceId(1)]);
        assert!(!mesh.is_boundary_edge(shared));
        assert!(mesh.is_manifold_edge(shared));
    }

    #[test]
    fn test_boundary_edge() {
        let mesh = two_quads();
        let edge = mesh.find_edge(VertexId(0), VertexId(1)).unwrap();

        assert!(mesh.is_boundary_edge(edge));
        assert_eq!(mesh.other_vertex(edge, VertexId(0)), Some(VertexId(1)));
        assert_eq!(mesh.other_vertex(edge, VertexId(5)), None);
    }

    #[test]
    fn test_face_edges_follow_winding() {
        let mesh = two_quads();
        let edges = mesh.face_edges(FaceId(0));
        let verts = mesh.face_vertices(FaceId(0));

        for (k, &edge) in edges.iter().enumerate() {
            let [a, b] = mesh.edge_vertices(edge).unwrap();
            let (u, w) = (verts[k], verts[(k + 1) % verts.len()]);
            assert!((a == u && b == w) || (a == w && b == u));
        }
    }

    #[test]
    fn test_vertex_faces_sorted_and_unique() {
        let mesh = two_quads();
        assert_eq!(mesh.vertex_faces(VertexId(4)), vec![FaceId(0), FaceId(1)]);
        assert_eq!(mesh.vertex_faces(VertexId(2)), vec![FaceId(1)]);
    }

    #[test]
    fn test_queries_on_missing_elements_are_empty() {
        let mesh = two_quads();

        assert!(mesh.face_vertices(FaceId(99)).is_empty());
        assert!(mesh.edge_faces(EdgeId(99)).is_empty());
        assert_eq!(mesh.edge_vertices(EdgeId(99)), None);
        assert!(!mesh.is_face_valid(FaceId(99)));
    }
}
